use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Borrowing, OverdueBoundary};

/// 表示用の貸出状態
///
/// 保存されたステータスと現在時刻から導出する。3つのうち必ず1つだけが成り立つ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStatus {
    /// 貸出中（返却期限内）
    Active,
    /// 延滞中（返却期限を過ぎて未返却）
    Overdue,
    /// 返却済み
    Returned,
}

impl DisplayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayStatus::Active => "active",
            DisplayStatus::Overdue => "overdue",
            DisplayStatus::Returned => "returned",
        }
    }
}

impl std::str::FromStr for DisplayStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(DisplayStatus::Active),
            "overdue" => Ok(DisplayStatus::Overdue),
            "returned" => Ok(DisplayStatus::Returned),
            _ => Err(format!("Invalid display status: {}", s)),
        }
    }
}

/// 純粋関数：表示用の貸出状態を導出する
///
/// - 返却済み（ステータスまたは返却日）なら日付に関係なくReturned
/// - 現在時刻が返却期限の瞬間を厳密に過ぎていればOverdue
/// - それ以外はActive（期限ちょうどは延滞ではない）
pub fn derive_status(
    borrowing: &Borrowing,
    now: DateTime<Utc>,
    boundary: OverdueBoundary,
) -> DisplayStatus {
    if borrowing.is_returned() {
        return DisplayStatus::Returned;
    }
    if now > boundary.due_instant(borrowing.due_date) {
        DisplayStatus::Overdue
    } else {
        DisplayStatus::Active
    }
}

/// 純粋関数：延滞判定
pub fn is_overdue(borrowing: &Borrowing, now: DateTime<Utc>, boundary: OverdueBoundary) -> bool {
    derive_status(borrowing, now, boundary) == DisplayStatus::Overdue
}
