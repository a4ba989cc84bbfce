use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{
    BookCondition, BookId, CopyId, Field, LendingPolicy, LifecycleError, UserId,
    commands::BorrowCopy,
    dates::{self, parse_calendar_date},
    due_date::{default_due_date, resolve_due_date},
};

/// 貸出フォームの入力状態
///
/// 入力値は文字列のまま保持し、`validate()`で初めてコマンドに変換する。
/// 職員が返却期限を手入力していない間は、貸出日の変更に合わせて返却期限を提案し直す。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowDraft {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub book_id: String,
    #[serde(default)]
    pub copy_id: String,
    #[serde(default)]
    pub borrow_date: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub condition_before: Option<BookCondition>,
    #[serde(default)]
    pub notes: String,
    #[serde(skip)]
    due_date_touched: bool,
}

impl BorrowDraft {
    /// 貸出日と提案された返却期限で初期化する
    pub fn new(borrow_date: NaiveDate, policy: &LendingPolicy) -> Self {
        Self {
            borrow_date: format_date(borrow_date),
            due_date: propose_due_date(borrow_date, policy),
            ..Self::default()
        }
    }

    /// 貸出日を変更する
    ///
    /// 返却期限が手入力されていなければ提案し直し、`true`を返す。
    pub fn set_borrow_date(&mut self, input: &str, policy: &LendingPolicy) -> bool {
        self.borrow_date = input.to_string();
        if self.due_date_touched {
            return false;
        }
        match dates::parse_iso_date(input) {
            Some(borrow_date) => {
                self.due_date = propose_due_date(borrow_date, policy);
                true
            }
            None => false,
        }
    }

    /// 返却期限を手入力する。空にすると再び提案値に従う。
    pub fn set_due_date(&mut self, input: &str) {
        self.due_date = input.to_string();
        self.due_date_touched = !input.trim().is_empty();
    }

    pub fn due_date_touched(&self) -> bool {
        self.due_date_touched
    }

    /// 入力を検証して貸出コマンドに変換する
    ///
    /// # エラー
    /// 最初に見つかった不正なフィールド（UIはこのフィールドにメッセージを表示し送信を止める）
    /// - MissingField: 利用者・書籍・蔵書の未選択
    /// - InvalidDateInput: 貸出日・返却期限の未入力/解析不能、返却期限が貸出日より前
    pub fn validate(&self, policy: &LendingPolicy) -> Result<BorrowCopy, LifecycleError> {
        let user_id = required(Field::UserId, &self.user_id)?;
        let book_id = required(Field::BookId, &self.book_id)?;
        let copy_id = required(Field::CopyId, &self.copy_id)?;

        let borrow_date = parse_calendar_date(Field::BorrowDate, &self.borrow_date)?;
        let explicit_due = if self.due_date.trim().is_empty() {
            None
        } else {
            Some(parse_calendar_date(Field::DueDate, &self.due_date)?)
        };
        let due_date = resolve_due_date(borrow_date, explicit_due, policy.loan_period)?;

        Ok(BorrowCopy {
            user_id: UserId::new(user_id),
            book_id: BookId::new(book_id),
            copy_id: CopyId::new(copy_id),
            borrow_date,
            due_date: Some(due_date),
            condition_before: self.condition_before,
            notes: self.notes.trim().to_string(),
        })
    }
}

fn required(field: Field, value: &str) -> Result<String, LifecycleError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(LifecycleError::MissingField { field });
    }
    Ok(value.to_string())
}

/// 提案できない場合は空にし、`validate()`で返却期限のエラーとして報告させる
fn propose_due_date(borrow_date: NaiveDate, policy: &LendingPolicy) -> String {
    default_due_date(borrow_date, policy.loan_period)
        .map(format_date)
        .unwrap_or_default()
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
