use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{BorrowingId, CopyId, LateFee, UserId, dates::iso_date, fees::FeeSource};

/// イベント：蔵書が返却された
///
/// 返却処理の結果をUIに伝える（遅延返却だったか、料金がどう決まったか）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyReturned {
    pub borrowing_id: BorrowingId,
    pub user_id: UserId,
    pub copy_id: CopyId,
    #[serde(with = "iso_date")]
    pub return_date: NaiveDate,
    pub was_overdue: bool,
    pub overdue_days: u64,
    pub late_fee: LateFee,
    pub fee_source: FeeSource,
}
