use std::env;

use thiserror::Error;

use crate::domain::{DailyRate, LendingPolicy, LoanPeriod, OverdueBoundary};

/// 設定読み込みのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// アプリケーション設定
///
/// 環境変数から読み込む。未設定の項目は既定値を使う。
/// - `LOAN_PERIOD_DAYS`（既定 14）
/// - `LATE_FEE_PER_DAY`（既定 5000）
/// - `OVERDUE_BOUNDARY`（`end-of-day` | `start-of-day`、既定 `end-of-day`）
/// - `CURRENCY_CODE`（既定 `VND`）
/// - `PORT`（既定 3000）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LendingConfig {
    pub loan_period: LoanPeriod,
    pub daily_rate: DailyRate,
    pub overdue_boundary: OverdueBoundary,
    pub currency_code: String,
    pub port: u16,
}

impl Default for LendingConfig {
    fn default() -> Self {
        Self {
            loan_period: LoanPeriod::DEFAULT,
            daily_rate: DailyRate::DEFAULT,
            overdue_boundary: OverdueBoundary::default(),
            currency_code: "VND".to_string(),
            port: 3000,
        }
    }
}

impl LendingConfig {
    /// `.env`があれば読み込んでから環境変数を解釈する
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の参照関数から設定を組み立てる（テストで環境変数を汚さないため）
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let loan_period = match lookup("LOAN_PERIOD_DAYS") {
            Some(raw) => {
                let days: u32 = parse_value("LOAN_PERIOD_DAYS", &raw)?;
                LoanPeriod::try_from(days).map_err(|e| ConfigError::InvalidValue {
                    key: "LOAN_PERIOD_DAYS",
                    reason: e.to_string(),
                })?
            }
            None => defaults.loan_period,
        };

        let daily_rate = match lookup("LATE_FEE_PER_DAY") {
            Some(raw) => DailyRate::new(parse_value("LATE_FEE_PER_DAY", &raw)?),
            None => defaults.daily_rate,
        };

        let overdue_boundary = match lookup("OVERDUE_BOUNDARY") {
            Some(raw) => raw
                .parse::<OverdueBoundary>()
                .map_err(|reason| ConfigError::InvalidValue {
                    key: "OVERDUE_BOUNDARY",
                    reason,
                })?,
            None => defaults.overdue_boundary,
        };

        let currency_code = lookup("CURRENCY_CODE")
            .map(|raw| raw.trim().to_string())
            .filter(|code| !code.is_empty())
            .unwrap_or(defaults.currency_code);

        let port = match lookup("PORT") {
            Some(raw) => parse_value("PORT", &raw)?,
            None => defaults.port,
        };

        Ok(Self {
            loan_period,
            daily_rate,
            overdue_boundary,
            currency_code,
            port,
        })
    }

    /// ドメインの純粋関数に渡す貸出ルール
    pub fn policy(&self) -> LendingPolicy {
        LendingPolicy {
            loan_period: self.loan_period,
            daily_rate: self.daily_rate,
            overdue_boundary: self.overdue_boundary,
        }
    }
}

fn parse_value<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidValue {
            key,
            reason: format!("'{}': {}", raw, e),
        })
}
