use serde::{Deserialize, Serialize};

use super::LifecycleError;

/// 貸出ID - バックエンドが払い出す不透明な文字列
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BorrowingId(String);

impl BorrowingId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 利用者ID - 利用者管理への参照
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 書籍ID - カタログ（タイトル）への参照
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 蔵書ID - 物理的な1冊への参照（タイトルではない）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CopyId(String);

impl CopyId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 予約ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(String);

impl ReservationId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 延滞料金（最小通貨単位の整数）
///
/// 不変条件：負の値にならない。
/// `u64`で保持し、外部入力（職員による手入力）は`TryFrom<i64>`で検証する。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LateFee(u64);

impl LateFee {
    pub fn new(amount: u64) -> Self {
        Self(amount)
    }

    pub fn zero() -> Self {
        Self(0)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// 3桁区切りの金額に通貨コードを付けた表示用文字列
    ///
    /// 例: `LateFee::new(15000).format("VND") == "15,000 VND"`
    pub fn format(&self, currency_code: &str) -> String {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        format!("{} {}", grouped, currency_code)
    }
}

impl TryFrom<i64> for LateFee {
    type Error = LifecycleError;

    fn try_from(amount: i64) -> Result<Self, Self::Error> {
        u64::try_from(amount)
            .map(Self)
            .map_err(|_| LifecycleError::NegativeFee { amount })
    }
}

/// 1日あたりの延滞料金
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyRate(u64);

impl DailyRate {
    pub const DEFAULT: DailyRate = DailyRate(5000);

    pub fn new(amount: u64) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl Default for DailyRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// 貸出期間エラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoanPeriodError {
    /// 0日の貸出期間は作れない
    Zero,
}

/// 貸出期間（日数）
///
/// 不変条件：1日以上。管理画面の「標準貸出日数」に相当する設定値。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct LoanPeriod(u32);

impl LoanPeriod {
    pub const DEFAULT: LoanPeriod = LoanPeriod(14);

    pub fn days(&self) -> u32 {
        self.0
    }
}

impl Default for LoanPeriod {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for LoanPeriod {
    type Error = LoanPeriodError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        if days == 0 {
            return Err(LoanPeriodError::Zero);
        }
        Ok(Self(days))
    }
}

impl From<LoanPeriod> for u32 {
    fn from(period: LoanPeriod) -> Self {
        period.0
    }
}

impl std::fmt::Display for LoanPeriodError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoanPeriodError::Zero => write!(f, "loan period must be at least one day"),
        }
    }
}

/// 蔵書の状態ラベル（貸出前・返却後に記録）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookCondition {
    New,
    Good,
    Fair,
    Poor,
    Damaged,
}

impl BookCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookCondition::New => "new",
            BookCondition::Good => "good",
            BookCondition::Fair => "fair",
            BookCondition::Poor => "poor",
            BookCondition::Damaged => "damaged",
        }
    }
}

impl std::str::FromStr for BookCondition {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(BookCondition::New),
            "good" => Ok(BookCondition::Good),
            "fair" => Ok(BookCondition::Fair),
            "poor" => Ok(BookCondition::Poor),
            "damaged" => Ok(BookCondition::Damaged),
            _ => Err(format!("Invalid book condition: {}", s)),
        }
    }
}
