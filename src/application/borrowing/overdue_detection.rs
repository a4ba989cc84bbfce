use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::{
    Borrowing, BorrowingId, CopyId, LateFee, LendingPolicy, UserId, dates, fees, status,
};

/// 延滞中の貸出1件分の一覧表示用データ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverdueNotice {
    pub borrowing_id: BorrowingId,
    pub user_id: UserId,
    pub copy_id: CopyId,
    #[serde(with = "crate::domain::dates::iso_date")]
    pub due_date: NaiveDate,
    pub days_overdue: u64,
    /// 今日返却された場合の延滞料金（返却時の計算と同じく暦日で数える）
    pub accrued_fee: LateFee,
}

/// 延滞検出（純粋な関数）
///
/// 未返却で返却期限の瞬間を過ぎた貸出を抜き出し、延滞日数と現時点の料金を付ける。
///
/// ビジネスルール：
/// - 返却済みは対象外
/// - 延滞日数は返却期限の瞬間から現在時刻までを切り上げで数える
/// - 料金は今日（UTCの暦日）返却した場合の`fees::late_fee`と一致させる
/// - 結果は延滞日数の多い順（同数なら返却期限の早い順）
pub fn detect_overdue_borrowings(
    borrowings: &[Borrowing],
    now: DateTime<Utc>,
    policy: &LendingPolicy,
) -> Vec<OverdueNotice> {
    let mut notices: Vec<OverdueNotice> = borrowings
        .iter()
        .filter(|b| status::is_overdue(b, now, policy.overdue_boundary))
        .map(|b| {
            let due_instant = policy.overdue_boundary.due_instant(b.due_date);
            let days_overdue = u64::try_from(dates::days_between(due_instant, now)).unwrap_or(0);
            OverdueNotice {
                borrowing_id: b.id.clone(),
                user_id: b.user_id.clone(),
                copy_id: b.copy_id.clone(),
                due_date: b.due_date,
                days_overdue,
                accrued_fee: fees::late_fee(b.due_date, now.date_naive(), policy.daily_rate),
            }
        })
        .collect();

    notices.sort_by(|a, b| {
        b.days_overdue
            .cmp(&a.days_overdue)
            .then(a.due_date.cmp(&b.due_date))
    });

    tracing::debug!(
        checked = borrowings.len(),
        overdue = notices.len(),
        "overdue detection finished"
    );

    notices
}
