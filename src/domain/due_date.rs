use chrono::{Days, NaiveDate};

use super::{Field, LifecycleError, LoanPeriod};

/// 純粋関数：標準の返却期限を提案する
///
/// 返却期限 = 貸出日 + 貸出期間
///
/// # エラー
/// 結果が表現できる日付の範囲を超える場合は`InvalidDateInput(due_date)`
pub fn default_due_date(
    borrow_date: NaiveDate,
    loan_period: LoanPeriod,
) -> Result<NaiveDate, LifecycleError> {
    borrow_date
        .checked_add_days(Days::new(u64::from(loan_period.days())))
        .ok_or_else(|| {
            LifecycleError::invalid_date(
                Field::DueDate,
                format!(
                    "{} + {} days is out of range",
                    borrow_date,
                    loan_period.days()
                ),
            )
        })
}

/// 純粋関数：返却期限を確定する
///
/// 明示的な返却期限があればそれを使い、なければ標準の期限を提案する。
///
/// # エラー
/// 明示的な返却期限が貸出日より前の場合は`InvalidDateInput(due_date)`
pub fn resolve_due_date(
    borrow_date: NaiveDate,
    explicit: Option<NaiveDate>,
    loan_period: LoanPeriod,
) -> Result<NaiveDate, LifecycleError> {
    match explicit {
        Some(due_date) if due_date < borrow_date => Err(LifecycleError::invalid_date(
            Field::DueDate,
            format!("{} is before the borrow date {}", due_date, borrow_date),
        )),
        Some(due_date) => Ok(due_date),
        None => default_due_date(borrow_date, loan_period),
    }
}
