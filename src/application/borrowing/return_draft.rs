use chrono::NaiveDate;

use crate::domain::{
    BookCondition, Borrowing, CopyReturned, DailyRate, Field, LateFee, LendingPolicy,
    LifecycleError, ReturnCopyError,
    borrowing::return_copy,
    commands::ReturnCopy,
    fees::{self, FeeSource},
};

/// 日付変更による延滞料金の再計算結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeNotice {
    /// 日付が変わらなかった（手入力の料金もそのまま）
    Unchanged,
    /// 料金を再計算した。手入力の料金を置き換えた場合はその値を返す。
    Recalculated {
        fee: LateFee,
        discarded_override: Option<LateFee>,
    },
}

/// 返却フォームの入力状態
///
/// 返却期限か返却日が変わるたびに延滞料金を再計算する。
/// 職員が料金を手入力した後に日付が変わると、手入力の値は再計算で置き換わる。
/// その場合は`FeeNotice::Recalculated`で置き換えた値を返し、黙って捨てない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnDraft {
    borrow_date: NaiveDate,
    due_date: NaiveDate,
    return_date: NaiveDate,
    late_fee: LateFee,
    fee_source: FeeSource,
    rate: DailyRate,
}

impl ReturnDraft {
    pub fn new(borrowing: &Borrowing, return_date: NaiveDate, policy: &LendingPolicy) -> Self {
        Self {
            borrow_date: borrowing.borrow_date,
            due_date: borrowing.due_date,
            return_date,
            late_fee: fees::late_fee(borrowing.due_date, return_date, policy.daily_rate),
            fee_source: FeeSource::Calculated,
            rate: policy.daily_rate,
        }
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn return_date(&self) -> NaiveDate {
        self.return_date
    }

    pub fn late_fee(&self) -> LateFee {
        self.late_fee
    }

    pub fn fee_source(&self) -> FeeSource {
        self.fee_source
    }

    pub fn overdue_days(&self) -> u64 {
        fees::overdue_days(self.due_date, self.return_date)
    }

    pub fn set_return_date(&mut self, return_date: NaiveDate) -> FeeNotice {
        if self.return_date == return_date {
            return FeeNotice::Unchanged;
        }
        self.return_date = return_date;
        self.recompute()
    }

    pub fn set_due_date(&mut self, due_date: NaiveDate) -> FeeNotice {
        if self.due_date == due_date {
            return FeeNotice::Unchanged;
        }
        self.due_date = due_date;
        self.recompute()
    }

    /// 延滞料金を手入力で上書きする（最後の書き込みが勝つ）
    ///
    /// # エラー
    /// 負の金額は`NegativeFee`
    pub fn override_fee(&mut self, amount: i64) -> Result<(), LifecycleError> {
        self.late_fee = LateFee::try_from(amount)?;
        self.fee_source = FeeSource::Manual;
        Ok(())
    }

    fn recompute(&mut self) -> FeeNotice {
        let discarded_override = match self.fee_source {
            FeeSource::Manual => Some(self.late_fee),
            FeeSource::Calculated => None,
        };
        self.late_fee = fees::late_fee(self.due_date, self.return_date, self.rate);
        self.fee_source = FeeSource::Calculated;

        if let Some(discarded) = discarded_override {
            tracing::warn!(
                discarded = discarded.value(),
                recalculated = self.late_fee.value(),
                "manual late fee replaced by recalculation"
            );
        }

        FeeNotice::Recalculated {
            fee: self.late_fee,
            discarded_override,
        }
    }

    /// フォームを送信して返却を確定する
    ///
    /// 返却期限を編集していた場合は、その期限で記録を更新してから返却する。
    pub fn submit(
        self,
        borrowing: &Borrowing,
        condition_after: Option<BookCondition>,
        notes: Option<String>,
        policy: &LendingPolicy,
    ) -> Result<(Borrowing, CopyReturned), ReturnCopyError> {
        if self.due_date < self.borrow_date {
            return Err(LifecycleError::invalid_date(
                Field::DueDate,
                format!("{} is before the borrow date {}", self.due_date, self.borrow_date),
            )
            .into());
        }

        let borrowing = Borrowing {
            due_date: self.due_date,
            ..borrowing.clone()
        };
        let cmd = ReturnCopy {
            return_date: self.return_date,
            condition_after,
            late_fee_override: match self.fee_source {
                FeeSource::Manual => Some(self.late_fee),
                FeeSource::Calculated => None,
            },
            notes,
        };
        return_copy(&borrowing, cmd, policy)
    }
}
