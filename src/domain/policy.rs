use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{DailyRate, LoanPeriod, dates::start_of_day};

/// 日付のみの返却期限を「期限の瞬間」に変換する方針
///
/// 画面ごとに比較がばらついていたため、ここで1つに固定する。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverdueBoundary {
    /// 返却期限日の終わり（23:59:59.999 UTC）まで貸出中
    #[default]
    EndOfDay,
    /// 返却期限日の開始（00:00 UTC）を過ぎたら延滞
    StartOfDay,
}

impl OverdueBoundary {
    /// 返却期限の瞬間。この瞬間を厳密に過ぎたら延滞。
    pub fn due_instant(&self, due_date: NaiveDate) -> DateTime<Utc> {
        match self {
            OverdueBoundary::EndOfDay => {
                start_of_day(due_date) + Duration::days(1) - Duration::milliseconds(1)
            }
            OverdueBoundary::StartOfDay => start_of_day(due_date),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OverdueBoundary::EndOfDay => "end-of-day",
            OverdueBoundary::StartOfDay => "start-of-day",
        }
    }
}

impl std::str::FromStr for OverdueBoundary {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "end-of-day" => Ok(OverdueBoundary::EndOfDay),
            "start-of-day" => Ok(OverdueBoundary::StartOfDay),
            _ => Err(format!("Invalid overdue boundary: {}", s)),
        }
    }
}

/// 貸出ルール（設定値の集合）
///
/// 純粋関数に明示的に渡す。グローバルな定数は持たない。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LendingPolicy {
    pub loan_period: LoanPeriod,
    pub daily_rate: DailyRate,
    pub overdue_boundary: OverdueBoundary,
}
