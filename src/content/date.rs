use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// 解析服务端返回的 ISO-8601 时间。
///
/// 依次尝试 RFC 3339、无时区的日期时间（按 UTC 处理）和纯日期（当天零点 UTC）。
pub fn parse_iso8601(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive_dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive_dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive_dt| naive_dt.and_utc())
}

/// 格式化为 `2024-01-15T10:00:00.000Z`，与浏览器 `toISOString` 一致
pub fn to_iso8601(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 展示用日期，如 `January 15, 2024`
pub fn format_display(dt: &DateTime<Utc>) -> String {
    dt.format("%B %-d, %Y").to_string()
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_iso8601(&s).ok_or_else(|| serde::de::Error::custom(format!("无法解析日期: {}", s)))
}

pub(crate) fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&to_iso8601(dt))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_parse_accepts_all_supported_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        assert_eq!(parse_iso8601("2024-01-15T10:00:00Z"), Some(expected));
        assert_eq!(parse_iso8601("2024-01-15T11:00:00+01:00"), Some(expected));
        assert_eq!(parse_iso8601("2024-01-15T10:00:00.000"), Some(expected));
        assert_eq!(parse_iso8601("2024-01-15 10:00:00"), Some(expected));
        assert_eq!(
            parse_iso8601("2024-01-15"),
            Some(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_iso8601("yesterday"), None);
        assert_eq!(parse_iso8601(""), None);
    }

    #[test]
    fn test_formats() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 5, 8, 30, 0).unwrap();
        assert_eq!(to_iso8601(&dt), "2024-01-05T08:30:00.000Z");
        assert_eq!(format_display(&dt), "January 5, 2024");
    }
}
