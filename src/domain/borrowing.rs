use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    BookCondition, BookId, BorrowingId, CopyId, CopyReturned, Field, LateFee, LendingPolicy,
    LifecycleError, ReturnCopyError, UserId,
    commands::{BorrowCopy, ReturnCopy},
    dates::iso_date,
    due_date::resolve_due_date,
    fees::{self, FeeSource},
};

/// 保存される貸出ステータス
///
/// 「延滞」は保存されない。日付から導出する表示上の状態（`DisplayStatus`）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorrowingStatus {
    #[serde(alias = "borrowed")]
    Borrowed,
    #[serde(alias = "returned")]
    Returned,
}

impl BorrowingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BorrowingStatus::Borrowed => "Borrowed",
            BorrowingStatus::Returned => "Returned",
        }
    }
}

/// 貸出記録 - 1冊の蔵書の1回の貸出
///
/// バックエンドのレコード形状（`_id`, ISO日付文字列）に合わせてシリアライズする。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Borrowing {
    #[serde(rename = "_id")]
    pub id: BorrowingId,

    pub user_id: UserId,
    pub book_id: BookId,
    pub copy_id: CopyId,

    #[serde(with = "iso_date")]
    pub borrow_date: NaiveDate,
    #[serde(with = "iso_date")]
    pub due_date: NaiveDate,
    #[serde(
        default,
        with = "iso_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub return_date: Option<NaiveDate>,

    pub status: BorrowingStatus,
    #[serde(default)]
    pub late_fee: LateFee,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_before: Option<BookCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_after: Option<BookCondition>,
    #[serde(default)]
    pub notes: String,
}

impl Borrowing {
    /// 返却済みか（ステータスまたは返却日のどちらかで判定）
    pub fn is_returned(&self) -> bool {
        self.status == BorrowingStatus::Returned || self.return_date.is_some()
    }

    /// バックエンドから受け取った記録の日付の前後関係を検証する
    ///
    /// # エラー
    /// - InvalidDateInput(due_date): 返却期限が貸出日より前
    /// - InvalidDateInput(return_date): 返却日が貸出日より前
    pub fn validate(&self) -> Result<(), LifecycleError> {
        if self.due_date < self.borrow_date {
            return Err(LifecycleError::invalid_date(
                Field::DueDate,
                format!(
                    "{} is before the borrow date {}",
                    self.due_date, self.borrow_date
                ),
            ));
        }
        if let Some(return_date) = self.return_date.filter(|d| *d < self.borrow_date) {
            return Err(LifecycleError::invalid_date(
                Field::ReturnDate,
                format!(
                    "{} is before the borrow date {}",
                    return_date, self.borrow_date
                ),
            ));
        }
        Ok(())
    }
}

/// 新規の貸出記録（IDはバックエンドが払い出す）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBorrowing {
    pub user_id: UserId,
    pub book_id: BookId,
    pub copy_id: CopyId,
    #[serde(with = "iso_date")]
    pub borrow_date: NaiveDate,
    #[serde(with = "iso_date")]
    pub due_date: NaiveDate,
    pub status: BorrowingStatus,
    pub late_fee: LateFee,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_before: Option<BookCondition>,
    #[serde(default)]
    pub notes: String,
}

impl NewBorrowing {
    /// バックエンドが払い出したIDを付けて貸出記録にする
    pub fn with_id(self, id: BorrowingId) -> Borrowing {
        Borrowing {
            id,
            user_id: self.user_id,
            book_id: self.book_id,
            copy_id: self.copy_id,
            borrow_date: self.borrow_date,
            due_date: self.due_date,
            return_date: None,
            status: self.status,
            late_fee: self.late_fee,
            condition_before: self.condition_before,
            condition_after: None,
            notes: self.notes,
        }
    }
}

/// 純粋関数：蔵書を貸し出す
///
/// ビジネスルール：
/// - 返却期限の指定がなければ 貸出日 + 貸出期間
/// - 返却期限は貸出日以降
/// - 状態はBorrowed、返却日なし、延滞料金0
pub fn borrow_copy(cmd: BorrowCopy, policy: &LendingPolicy) -> Result<NewBorrowing, LifecycleError> {
    let due_date = resolve_due_date(cmd.borrow_date, cmd.due_date, policy.loan_period)?;

    Ok(NewBorrowing {
        user_id: cmd.user_id,
        book_id: cmd.book_id,
        copy_id: cmd.copy_id,
        borrow_date: cmd.borrow_date,
        due_date,
        status: BorrowingStatus::Borrowed,
        late_fee: LateFee::zero(),
        condition_before: cmd.condition_before,
        notes: cmd.notes,
    })
}

/// 純粋関数：蔵書を返却する
///
/// ビジネスルール：
/// - 返却は1回だけ（返却済みはエラー）
/// - 返却日は貸出日以降
/// - 延滞料金は手入力があればそれを優先し、なければ自動計算
///
/// 副作用なし。返却済みの記録とイベントを返す。
pub fn return_copy(
    borrowing: &Borrowing,
    cmd: ReturnCopy,
    policy: &LendingPolicy,
) -> Result<(Borrowing, CopyReturned), ReturnCopyError> {
    if borrowing.is_returned() {
        return Err(ReturnCopyError::AlreadyReturned);
    }
    borrowing.validate()?;

    if cmd.return_date < borrowing.borrow_date {
        return Err(LifecycleError::invalid_date(
            Field::ReturnDate,
            format!(
                "{} is before the borrow date {}",
                cmd.return_date, borrowing.borrow_date
            ),
        )
        .into());
    }

    let overdue_days = fees::overdue_days(borrowing.due_date, cmd.return_date);
    let (late_fee, fee_source) = match cmd.late_fee_override {
        Some(fee) => (fee, FeeSource::Manual),
        None => (
            fees::late_fee(borrowing.due_date, cmd.return_date, policy.daily_rate),
            FeeSource::Calculated,
        ),
    };

    let returned = Borrowing {
        return_date: Some(cmd.return_date),
        status: BorrowingStatus::Returned,
        late_fee,
        condition_after: cmd.condition_after,
        notes: cmd.notes.unwrap_or_else(|| borrowing.notes.clone()),
        ..borrowing.clone()
    };

    let event = CopyReturned {
        borrowing_id: borrowing.id.clone(),
        user_id: borrowing.user_id.clone(),
        copy_id: borrowing.copy_id.clone(),
        return_date: cmd.return_date,
        was_overdue: overdue_days > 0,
        overdue_days,
        late_fee,
        fee_source,
    };

    tracing::info!(
        borrowing_id = borrowing.id.as_str(),
        overdue_days,
        late_fee = late_fee.value(),
        ?fee_source,
        "copy returned"
    );

    Ok((returned, event))
}
