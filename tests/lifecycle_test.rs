use chrono::{Duration, NaiveDate};
use rusty_library_lending::domain::{
    BookId, Borrowing, BorrowingId, BorrowingStatus, CopyId, DailyRate, DisplayStatus, LateFee,
    LoanPeriod, OverdueBoundary, UserId,
    dates::{days_between, start_of_day},
    due_date::default_due_date,
    fees::late_fee,
    status::derive_status,
};

mod common;

use common::date;

fn borrowing(due_date: NaiveDate, return_date: Option<NaiveDate>) -> Borrowing {
    Borrowing {
        id: BorrowingId::new("b-1"),
        user_id: UserId::new("u-1"),
        book_id: BookId::new("bk-1"),
        copy_id: CopyId::new("c-1"),
        borrow_date: due_date - Duration::days(14),
        due_date,
        return_date,
        status: if return_date.is_some() {
            BorrowingStatus::Returned
        } else {
            BorrowingStatus::Borrowed
        },
        late_fee: LateFee::zero(),
        condition_before: None,
        condition_after: None,
        notes: String::new(),
    }
}

// ============================================================================
// 延滞料金
// ============================================================================

#[test]
fn test_no_fee_for_any_on_time_return() {
    let due = date(2024, 1, 31);
    for offset in 0..60 {
        let returned = due - Duration::days(offset);
        assert_eq!(
            late_fee(due, returned, DailyRate::DEFAULT),
            LateFee::zero(),
            "returned {offset} days early"
        );
    }
}

#[test]
fn test_fee_is_non_decreasing_in_return_date() {
    let due = date(2024, 1, 10);
    let mut previous = LateFee::zero();
    for offset in -30..90 {
        let fee = late_fee(due, due + Duration::days(offset), DailyRate::DEFAULT);
        assert!(fee >= previous, "fee decreased at offset {offset}");
        previous = fee;
    }
}

#[test]
fn test_fee_concrete_scenarios() {
    let rate = DailyRate::new(5000);
    assert_eq!(late_fee(date(2024, 1, 10), date(2024, 1, 13), rate).value(), 15000);
    assert_eq!(late_fee(date(2024, 1, 10), date(2024, 1, 10), rate).value(), 0);
}

// ============================================================================
// 日数計算
// ============================================================================

#[test]
fn test_ceiling_day_count() {
    let a = start_of_day(date(2024, 1, 1));
    assert_eq!(days_between(a, a + Duration::hours(24)), 1);
    assert_eq!(
        days_between(a, a + Duration::hours(24) + Duration::milliseconds(1)),
        2
    );
}

// ============================================================================
// 表示状態
// ============================================================================

#[test]
fn test_status_is_exactly_one_of_three() {
    let due = date(2024, 1, 10);
    let records = [
        borrowing(due, None),
        borrowing(due, Some(date(2024, 1, 5))),
        borrowing(due, Some(date(2024, 1, 20))),
    ];
    for boundary in [OverdueBoundary::EndOfDay, OverdueBoundary::StartOfDay] {
        for hours in (0..24 * 30).step_by(7) {
            let now = start_of_day(date(2024, 1, 1)) + Duration::hours(hours);
            for record in &records {
                let status = derive_status(record, now, boundary);
                let flags = [
                    status == DisplayStatus::Active,
                    status == DisplayStatus::Overdue,
                    status == DisplayStatus::Returned,
                ];
                assert_eq!(flags.iter().filter(|f| **f).count(), 1);
            }
        }
    }
}

#[test]
fn test_returned_late_is_still_returned() {
    let record = borrowing(date(2024, 1, 10), Some(date(2024, 1, 25)));
    let now = start_of_day(date(2024, 3, 1));
    assert_eq!(
        derive_status(&record, now, OverdueBoundary::EndOfDay),
        DisplayStatus::Returned
    );
}

// ============================================================================
// 返却期限の提案
// ============================================================================

#[test]
fn test_default_due_date_scenarios() {
    let period = LoanPeriod::try_from(14).unwrap();
    assert_eq!(default_due_date(date(2024, 1, 1), period), Ok(date(2024, 1, 15)));
    assert_eq!(default_due_date(date(2024, 3, 1), period), Ok(date(2024, 3, 15)));
}
