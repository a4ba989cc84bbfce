use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    BookCondition, Borrowing, CopyReturned, DisplayStatus, reservation::Reservation,
};

/// 表示状態の問い合わせ（POST /borrowings/status）
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub borrowing: Borrowing,
    /// 省略時はサーバーの時計
    pub as_of: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub borrowing_id: String,
    pub status: DisplayStatus,
}

/// 延滞料金の見積もり（POST /borrowings/late-fee）
#[derive(Debug, Deserialize)]
pub struct LateFeeRequest {
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub return_date: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LateFeeResponse {
    pub overdue_days: u64,
    pub late_fee: u64,
    pub formatted: String,
}

/// 返却期限の提案（POST /borrowings/due-date）
#[derive(Debug, Deserialize)]
pub struct DueDateRequest {
    #[serde(default)]
    pub borrow_date: String,
    /// 省略時は設定の標準貸出期間
    pub loan_period_days: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DueDateResponse {
    pub due_date: String,
}

/// 返却処理（POST /borrowings/return）
#[derive(Debug, Deserialize)]
pub struct ReturnRequest {
    pub borrowing: Borrowing,
    #[serde(default)]
    pub return_date: String,
    pub condition_after: Option<BookCondition>,
    /// 職員が手入力した延滞料金
    pub late_fee_override: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReturnResponse {
    pub borrowing: Borrowing,
    pub summary: CopyReturned,
    pub formatted_fee: String,
}

/// 貸出一覧の検索（POST /borrowings/search）
#[derive(Debug, Deserialize)]
pub struct BorrowingSearchRequest {
    pub records: Vec<Borrowing>,
    #[serde(default)]
    pub term: String,
    pub status: Option<String>,
    pub as_of: Option<DateTime<Utc>>,
}

/// 一覧の1行（記録 + 導出した表示状態）
#[derive(Debug, Serialize, Deserialize)]
pub struct BorrowingListItem {
    #[serde(flatten)]
    pub borrowing: Borrowing,
    pub display_status: DisplayStatus,
}

/// 延滞一覧（POST /borrowings/overdue）
#[derive(Debug, Deserialize)]
pub struct OverdueRequest {
    pub records: Vec<Borrowing>,
    pub as_of: Option<DateTime<Utc>>,
}

/// 予約一覧の検索（POST /reservations/search）
#[derive(Debug, Deserialize)]
pub struct ReservationSearchRequest {
    pub records: Vec<Reservation>,
    #[serde(default)]
    pub term: String,
    pub status: Option<String>,
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// 不正な入力フィールド（フォームのインライン表示用）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}
