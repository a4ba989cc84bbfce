use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{BookCondition, BookId, CopyId, LateFee, UserId};

/// コマンド：蔵書を貸し出す
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowCopy {
    pub user_id: UserId,
    pub book_id: BookId,
    pub copy_id: CopyId,
    pub borrow_date: NaiveDate,
    /// 未指定なら標準の貸出期間から提案する
    pub due_date: Option<NaiveDate>,
    pub condition_before: Option<BookCondition>,
    pub notes: String,
}

/// コマンド：蔵書を返却する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnCopy {
    pub return_date: NaiveDate,
    pub condition_after: Option<BookCondition>,
    /// 職員が手入力した延滞料金。`None`なら自動計算。
    pub late_fee_override: Option<LateFee>,
    /// 指定時は備考を置き換える
    pub notes: Option<String>,
}
