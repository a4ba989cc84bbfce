use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{DailyRate, LateFee, dates};

/// 延滞料金の出どころ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeSource {
    /// 返却期限と返却日から自動計算
    Calculated,
    /// 職員による手入力
    Manual,
}

/// 純粋関数：延滞日数
///
/// 返却日が返却期限以前なら0。それ以外は`days_between`（切り上げ）で数える。
pub fn overdue_days(due_date: NaiveDate, return_date: NaiveDate) -> u64 {
    if return_date <= due_date {
        return 0;
    }
    let days = dates::days_between(dates::start_of_day(due_date), dates::start_of_day(return_date));
    u64::try_from(days).unwrap_or(0)
}

/// 純粋関数：延滞料金
///
/// ビジネスルール：
/// - 返却期限以前の返却は0
/// - 延滞時は 延滞日数 × 1日あたりの料金
/// - 負にはならない（型で保証）
pub fn late_fee(due_date: NaiveDate, return_date: NaiveDate, rate: DailyRate) -> LateFee {
    let days = overdue_days(due_date, return_date);
    let fee = LateFee::new(days.saturating_mul(rate.value()));
    tracing::debug!(
        %due_date,
        %return_date,
        overdue_days = days,
        late_fee = fee.value(),
        "late fee computed"
    );
    fee
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_late_fee_three_days_late() {
        let due = date(2024, 1, 10);
        let returned = date(2024, 1, 13);
        assert_eq!(overdue_days(due, returned), 3);
        assert_eq!(late_fee(due, returned, DailyRate::new(5000)).value(), 15000);
    }

    #[test]
    fn test_late_fee_zero_when_returned_on_due_date() {
        let due = date(2024, 1, 10);
        assert_eq!(late_fee(due, due, DailyRate::DEFAULT), LateFee::zero());
    }

    #[test]
    fn test_late_fee_zero_when_returned_early() {
        let due = date(2024, 1, 10);
        assert_eq!(overdue_days(due, date(2024, 1, 2)), 0);
        assert_eq!(late_fee(due, date(2024, 1, 2), DailyRate::DEFAULT), LateFee::zero());
    }

    #[test]
    fn test_late_fee_uses_configured_rate() {
        let due = date(2024, 1, 10);
        let fee = late_fee(due, date(2024, 1, 11), DailyRate::new(1200));
        assert_eq!(fee.value(), 1200);
    }

    #[test]
    fn test_late_fee_saturates_instead_of_overflowing() {
        let fee = late_fee(date(2000, 1, 1), date(2024, 1, 1), DailyRate::new(u64::MAX));
        assert_eq!(fee.value(), u64::MAX);
    }
}
