//! 一覧画面の検索・絞り込み
//!
//! `matches = matches_search(record, term) && matches_status_filter(record, filter, ctx)`
//! 検索語は大文字小文字を区別しない部分一致。対象フィールドはエンティティごとに固定。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Borrowing, DisplayStatus, OverdueBoundary,
    directory::{AccountStatus, Availability, BookRecord, UserRecord},
    reservation::{Reservation, ReservationStatus},
    status::derive_status,
};

/// 検索語の照合対象となるフィールドを持つ記録
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

/// ステータス絞り込みの条件
pub trait StatusFilter<T> {
    fn admits(&self, record: &T, ctx: &FilterContext) -> bool;
}

/// 絞り込みに必要な外部の値（現在時刻は呼び出し側が注入する）
#[derive(Debug, Clone, Copy)]
pub struct FilterContext {
    pub now: DateTime<Utc>,
    pub boundary: OverdueBoundary,
}

/// 検索語とステータス条件の組
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery<F> {
    pub term: String,
    pub status: Option<F>,
}

impl<F> SearchQuery<F> {
    pub fn new(term: impl Into<String>, status: Option<F>) -> Self {
        Self {
            term: term.into(),
            status,
        }
    }

    pub fn matches<T>(&self, record: &T, ctx: &FilterContext) -> bool
    where
        T: Searchable,
        F: StatusFilter<T>,
    {
        matches_search(record, &self.term) && matches_status_filter(record, self.status.as_ref(), ctx)
    }

    /// 条件に合う記録だけを元の順序のまま返す
    pub fn apply<T>(&self, records: impl IntoIterator<Item = T>, ctx: &FilterContext) -> Vec<T>
    where
        T: Searchable,
        F: StatusFilter<T>,
    {
        records
            .into_iter()
            .filter(|record| self.matches(record, ctx))
            .collect()
    }
}

/// 検索語が空なら常に一致。それ以外はいずれかのフィールドに部分一致すれば一致。
pub fn matches_search<T: Searchable>(record: &T, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    record
        .search_fields()
        .into_iter()
        .any(|field| field.to_lowercase().contains(&term))
}

/// 条件なしなら常に一致
pub fn matches_status_filter<T, F: StatusFilter<T>>(
    record: &T,
    filter: Option<&F>,
    ctx: &FilterContext,
) -> bool {
    filter.is_none_or(|filter| filter.admits(record, ctx))
}

// ============================================================================
// 貸出
// ============================================================================

impl Searchable for Borrowing {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.user_id.as_str(),
            self.book_id.as_str(),
            self.copy_id.as_str(),
            self.notes.as_str(),
        ]
    }
}

/// 貸出一覧のステータス絞り込み
///
/// `Borrowed`/`Returned`は返却済みか（ステータスまたは返却日）で判定し、表示状態と食い違わない。
/// `Active`/`Overdue`は現在時刻から導出した表示状態との一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorrowingFilter {
    Borrowed,
    Returned,
    Active,
    Overdue,
}

impl std::str::FromStr for BorrowingFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "borrowed" => Ok(BorrowingFilter::Borrowed),
            "returned" => Ok(BorrowingFilter::Returned),
            "active" => Ok(BorrowingFilter::Active),
            "overdue" => Ok(BorrowingFilter::Overdue),
            _ => Err(format!("Invalid borrowing status filter: {}", s)),
        }
    }
}

impl StatusFilter<Borrowing> for BorrowingFilter {
    fn admits(&self, record: &Borrowing, ctx: &FilterContext) -> bool {
        match self {
            BorrowingFilter::Borrowed => !record.is_returned(),
            BorrowingFilter::Returned => record.is_returned(),
            BorrowingFilter::Active => {
                derive_status(record, ctx.now, ctx.boundary) == DisplayStatus::Active
            }
            BorrowingFilter::Overdue => {
                derive_status(record, ctx.now, ctx.boundary) == DisplayStatus::Overdue
            }
        }
    }
}

// ============================================================================
// 予約・利用者・書籍
// ============================================================================

impl Searchable for Reservation {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.user_id.as_str(),
            self.book_id.as_str(),
        ]
    }
}

impl StatusFilter<Reservation> for ReservationStatus {
    fn admits(&self, record: &Reservation, _ctx: &FilterContext) -> bool {
        record.status == *self
    }
}

impl Searchable for UserRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.phone.as_str()]
    }
}

impl StatusFilter<UserRecord> for AccountStatus {
    fn admits(&self, record: &UserRecord, _ctx: &FilterContext) -> bool {
        record.status == *self
    }
}

impl Searchable for BookRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.author.as_str(),
            self.isbn.as_str(),
            self.category.as_str(),
        ]
    }
}

impl StatusFilter<BookRecord> for Availability {
    fn admits(&self, record: &BookRecord, _ctx: &FilterContext) -> bool {
        record.status == *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        BookId, BorrowingId, BorrowingStatus, CopyId, LateFee, ReservationId, UserId,
        dates::start_of_day,
        directory::UserRole,
    };
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ctx() -> FilterContext {
        FilterContext {
            now: start_of_day(date(2024, 1, 15)),
            boundary: OverdueBoundary::EndOfDay,
        }
    }

    fn borrowing(id: &str, due_date: NaiveDate, returned: bool, notes: &str) -> Borrowing {
        Borrowing {
            id: BorrowingId::new(id),
            user_id: UserId::new("user-nguyen"),
            book_id: BookId::new("book-rust"),
            copy_id: CopyId::new(format!("copy-{id}")),
            borrow_date: date(2024, 1, 1),
            due_date,
            return_date: returned.then_some(date(2024, 1, 9)),
            status: if returned {
                BorrowingStatus::Returned
            } else {
                BorrowingStatus::Borrowed
            },
            late_fee: LateFee::zero(),
            condition_before: None,
            condition_after: None,
            notes: notes.to_string(),
        }
    }

    fn sample() -> Vec<Borrowing> {
        vec![
            borrowing("b1", date(2024, 1, 10), false, "Cover torn"),
            borrowing("b2", date(2024, 1, 20), false, ""),
            borrowing("b3", date(2024, 1, 10), true, ""),
        ]
    }

    fn ids(records: &[Borrowing]) -> Vec<&str> {
        records.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn test_blank_term_matches_everything() {
        let query: SearchQuery<BorrowingFilter> = SearchQuery::new("  ", None);
        assert_eq!(query.apply(sample(), &ctx()).len(), 3);
    }

    #[test]
    fn test_term_is_case_insensitive_substring() {
        let query: SearchQuery<BorrowingFilter> = SearchQuery::new("COVER", None);
        assert_eq!(ids(&query.apply(sample(), &ctx())), vec!["b1"]);
    }

    #[test]
    fn test_overdue_filter_is_computed() {
        let query = SearchQuery::new("", Some(BorrowingFilter::Overdue));
        assert_eq!(ids(&query.apply(sample(), &ctx())), vec!["b1"]);
    }

    #[test]
    fn test_active_filter_excludes_overdue_and_returned() {
        let query = SearchQuery::new("", Some(BorrowingFilter::Active));
        assert_eq!(ids(&query.apply(sample(), &ctx())), vec!["b2"]);
    }

    #[test]
    fn test_borrowed_filter_excludes_returned() {
        let query = SearchQuery::new("", Some(BorrowingFilter::Borrowed));
        assert_eq!(ids(&query.apply(sample(), &ctx())), vec!["b1", "b2"]);
    }

    #[test]
    fn test_return_date_counts_as_returned_despite_stale_status() {
        let stale = Borrowing {
            status: BorrowingStatus::Borrowed,
            ..borrowing("b4", date(2024, 1, 10), true, "")
        };
        assert_eq!(
            derive_status(&stale, ctx().now, ctx().boundary),
            DisplayStatus::Returned
        );

        let borrowed = SearchQuery::new("", Some(BorrowingFilter::Borrowed));
        assert!(borrowed.apply(vec![stale.clone()], &ctx()).is_empty());

        let returned = SearchQuery::new("", Some(BorrowingFilter::Returned));
        assert_eq!(ids(&returned.apply(vec![stale], &ctx())), vec!["b4"]);
    }

    #[test]
    fn test_term_and_status_combine() {
        let query = SearchQuery::new("copy-b", Some(BorrowingFilter::Returned));
        assert_eq!(ids(&query.apply(sample(), &ctx())), vec!["b3"]);
    }

    #[test]
    fn test_reservation_status_filter() {
        let reservation = |id: &str, status| Reservation {
            id: ReservationId::new(id),
            user_id: UserId::new("u1"),
            book_id: BookId::new("bk1"),
            reservation_date: date(2024, 2, 1),
            expiry_date: date(2024, 2, 8),
            status,
        };
        let records = vec![
            reservation("r1", ReservationStatus::Pending),
            reservation("r2", ReservationStatus::Ready),
        ];
        let query = SearchQuery::new("r", Some(ReservationStatus::Ready));
        let found = query.apply(records, &ctx());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id.as_str(), "r2");
    }

    #[test]
    fn test_user_search_by_email() {
        let user = UserRecord {
            id: UserId::new("u1"),
            name: "Tran Thi Mai".into(),
            email: "mai@example.org".into(),
            phone: String::new(),
            role: UserRole::Member,
            status: AccountStatus::Active,
        };
        assert!(matches_search(&user, "EXAMPLE.org"));
        assert!(!matches_search(&user, "staff"));
        assert!(!SearchQuery::new("", Some(AccountStatus::Inactive)).matches(&user, &ctx()));
    }

    #[test]
    fn test_book_search_by_author() {
        let book = BookRecord {
            id: BookId::new("bk1"),
            title: "The Rust Programming Language".into(),
            author: "Klabnik".into(),
            isbn: "9781718503106".into(),
            category: "Programming".into(),
            status: Availability::Available,
        };
        let query = SearchQuery::new("klab", Some(Availability::Available));
        assert!(query.matches(&book, &ctx()));
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!(
            "Overdue".parse::<BorrowingFilter>().unwrap(),
            BorrowingFilter::Overdue
        );
        assert!("late".parse::<BorrowingFilter>().is_err());
    }
}
