use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use super::{Field, LifecycleError};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// 2つの時刻の間の日数（切り上げ）
///
/// ミリ秒差の絶対値を取り、1日に満たない端数があれば1日として数える。
/// 向きは問わない：`days_between(a, b) == days_between(b, a)`。
pub fn days_between(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    let millis = (b - a).num_milliseconds().abs();
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

/// `date`が`reference_now`より厳密に前か
pub fn is_past(date: DateTime<Utc>, reference_now: DateTime<Utc>) -> bool {
    date < reference_now
}

/// 暦日の開始時刻（UTC 00:00）
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// ISO形式の日付文字列を暦日として解析する
///
/// `YYYY-MM-DD`またはRFC 3339のタイムスタンプを受け付ける。
/// タイムスタンプの場合は記載されたオフセットでの日付を採用し、時刻は捨てる。
pub fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|timestamp| timestamp.date_naive())
}

/// フォーム入力の日付を解析する
///
/// # エラー
/// 未入力または解析できない場合は、フィールド名付きの`InvalidDateInput`
pub fn parse_calendar_date(field: Field, input: &str) -> Result<NaiveDate, LifecycleError> {
    if input.trim().is_empty() {
        return Err(LifecycleError::invalid_date(field, "is required"));
    }
    parse_iso_date(input).ok_or_else(|| {
        LifecycleError::invalid_date(field, format!("'{}' is not an ISO date (YYYY-MM-DD)", input))
    })
}

/// 暦日を`YYYY-MM-DD`でシリアライズし、ISO文字列全般からデシリアライズする
pub mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_iso_date(&raw).ok_or_else(|| D::Error::custom(format!("invalid ISO date: {raw}")))
    }

    /// 省略可能な日付。`null`・欠落・空文字列は`None`
    pub mod option {
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer, Serializer, de::Error};

        pub fn serialize<S: Serializer>(
            date: &Option<NaiveDate>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => super::serialize(date, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            let raw = Option::<String>::deserialize(deserializer)?;
            match raw {
                None => Ok(None),
                Some(raw) if raw.trim().is_empty() => Ok(None),
                Some(raw) => super::super::parse_iso_date(&raw)
                    .map(Some)
                    .ok_or_else(|| D::Error::custom(format!("invalid ISO date: {raw}"))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_between_exact_day_is_one() {
        let a = start_of_day(date(2024, 1, 10));
        assert_eq!(days_between(a, a + Duration::hours(24)), 1);
    }

    #[test]
    fn test_days_between_rounds_fraction_up() {
        let a = start_of_day(date(2024, 1, 10));
        let b = a + Duration::hours(24) + Duration::milliseconds(1);
        assert_eq!(days_between(a, b), 2);
        assert_eq!(days_between(a, a + Duration::minutes(1)), 1);
    }

    #[test]
    fn test_days_between_same_instant_is_zero() {
        let a = start_of_day(date(2024, 1, 10));
        assert_eq!(days_between(a, a), 0);
    }

    #[test]
    fn test_days_between_ignores_direction() {
        let a = start_of_day(date(2024, 1, 10));
        let b = start_of_day(date(2024, 1, 13));
        assert_eq!(days_between(a, b), 3);
        assert_eq!(days_between(b, a), 3);
    }

    #[test]
    fn test_is_past_is_strict() {
        let now = start_of_day(date(2024, 1, 10));
        assert!(is_past(now - Duration::milliseconds(1), now));
        assert!(!is_past(now, now));
        assert!(!is_past(now + Duration::milliseconds(1), now));
    }

    #[test]
    fn test_parse_iso_date_accepts_plain_and_timestamp() {
        assert_eq!(parse_iso_date("2024-01-10"), Some(date(2024, 1, 10)));
        assert_eq!(
            parse_iso_date("2024-01-10T00:00:00.000Z"),
            Some(date(2024, 1, 10))
        );
        assert_eq!(
            parse_iso_date("2024-01-10T23:30:00+07:00"),
            Some(date(2024, 1, 10))
        );
        assert_eq!(parse_iso_date("10/01/2024"), None);
    }

    #[test]
    fn test_parse_calendar_date_names_the_field() {
        let err = parse_calendar_date(Field::DueDate, "  ").unwrap_err();
        assert_eq!(err.field(), Field::DueDate);

        let err = parse_calendar_date(Field::ReturnDate, "yesterday").unwrap_err();
        assert!(matches!(
            err,
            LifecycleError::InvalidDateInput {
                field: Field::ReturnDate,
                ..
            }
        ));
    }
}
