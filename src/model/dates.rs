use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d.%m.%Y"];

/// Try parsing a date string with several common formats.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Parse a date with an optional time of day. A bare date means midnight.
pub fn parse_date_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| parse_date(s).map(|d| d.and_time(NaiveTime::MIN)))
}

/// Serde helper for lenient `NaiveDate` fields.
pub mod date_serde {
    use chrono::NaiveDate;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_date(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid date '{}'", s)))
    }
}

/// Serde helper for lenient `NaiveDateTime` fields.
pub mod date_time_serde {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format("%Y-%m-%d %H:%M").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_date_time(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid date/time '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 15);
        assert_eq!(parse_date("2024-02-15"), expected);
        assert_eq!(parse_date("15/02/2024"), expected);
        assert_eq!(parse_date(" 2024/02/15 "), expected);
        assert_eq!(parse_date("15.02.2024"), expected);
        assert_eq!(parse_date("Feb 15"), None);
    }

    #[test]
    fn test_parse_date_time_defaults_to_midnight() {
        let dt = parse_date_time("2024-02-15").expect("bare date should parse");
        assert_eq!(dt.format("%H:%M").to_string(), "00:00");

        let dt = parse_date_time("2024-02-15 09:30").expect("date and time should parse");
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-02-15 09:30");

        let dt = parse_date_time("2024-02-15T17:05:00").expect("iso date-time should parse");
        assert_eq!(dt.format("%H:%M").to_string(), "17:05");
    }
}
