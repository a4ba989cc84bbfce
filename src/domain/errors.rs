use thiserror::Error;

/// 入力フォームのフィールド名
///
/// 検証エラーで「どのフィールドが不正か」をUIに伝えるために使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    UserId,
    BookId,
    CopyId,
    BorrowDate,
    DueDate,
    ReturnDate,
    LateFee,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::UserId => "user_id",
            Field::BookId => "book_id",
            Field::CopyId => "copy_id",
            Field::BorrowDate => "borrow_date",
            Field::DueDate => "due_date",
            Field::ReturnDate => "return_date",
            Field::LateFee => "late_fee",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 貸出ライフサイクル計算のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// 日付が未入力・解析不能・前後関係が不正
    #[error("Invalid {field}: {reason}")]
    InvalidDateInput { field: Field, reason: String },

    /// 必須項目が未入力
    #[error("Missing {field}")]
    MissingField { field: Field },

    /// 延滞料金が負になる入力（手入力の上書きなど）
    #[error("Late fee must not be negative (got {amount})")]
    NegativeFee { amount: i64 },
}

impl LifecycleError {
    pub fn invalid_date(field: Field, reason: impl Into<String>) -> Self {
        LifecycleError::InvalidDateInput {
            field,
            reason: reason.into(),
        }
    }

    /// エラーの原因となったフィールド
    pub fn field(&self) -> Field {
        match self {
            LifecycleError::InvalidDateInput { field, .. } => *field,
            LifecycleError::MissingField { field } => *field,
            LifecycleError::NegativeFee { .. } => Field::LateFee,
        }
    }
}

/// 返却のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReturnCopyError {
    /// 既に返却済み（返却は1回だけ）
    #[error("Borrowing is already returned")]
    AlreadyReturned,

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}
