use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{BookId, ReservationId, UserId, dates::iso_date};

/// 予約ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationStatus {
    /// 受付済み（取り置き待ち）
    #[serde(alias = "pending")]
    Pending,
    /// 取り置き済み（受け取り可能）
    #[serde(alias = "ready")]
    Ready,
    /// 貸出に転換済み
    #[serde(alias = "fulfilled")]
    Fulfilled,
    /// 取消
    #[serde(alias = "cancelled")]
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "Pending",
            ReservationStatus::Ready => "Ready",
            ReservationStatus::Fulfilled => "Fulfilled",
            ReservationStatus::Cancelled => "Cancelled",
        }
    }

    /// まだ完了・取消になっていないか
    pub fn is_open(&self) -> bool {
        matches!(self, ReservationStatus::Pending | ReservationStatus::Ready)
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ReservationStatus::Pending),
            "ready" => Ok(ReservationStatus::Ready),
            "fulfilled" => Ok(ReservationStatus::Fulfilled),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            _ => Err(format!("Invalid reservation status: {}", s)),
        }
    }
}

/// 予約記録（表示用にステータスの語彙だけ使う）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(rename = "_id")]
    pub id: ReservationId,
    pub user_id: UserId,
    pub book_id: BookId,
    #[serde(with = "iso_date")]
    pub reservation_date: NaiveDate,
    #[serde(with = "iso_date")]
    pub expiry_date: NaiveDate,
    pub status: ReservationStatus,
}
