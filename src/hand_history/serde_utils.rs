use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer};

use crate::core::Amount;

/// Parse a hand history timestamp.
///
/// Accepts RFC 3339 with any offset (normalised to UTC) and, because several
/// producers drop the zone designator, a naive `YYYY-MM-DDTHH:MM:SS[.f]`
/// timestamp taken to be UTC already.
pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(rfc_err) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|_| rfc_err),
    }
}

pub(crate) fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub(crate) mod iso8601 {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}

/// Optional amounts where absent, `null` and `0` all mean "not applicable".
pub(crate) fn zero_is_none<'de, D>(deserializer: D) -> Result<Option<Amount>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Amount::non_zero(Option::<Amount>::deserialize(deserializer)?))
}

pub(crate) fn is_none_or_zero(value: &Option<Amount>) -> bool {
    Amount::non_zero(*value).is_none()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SeqOrString<T> {
    Seq(Vec<T>),
    Str(String),
}

/// Card lists that some producers write as `""` when there are no cards.
pub(crate) fn empty_string_is_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<SeqOrString<T>>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(SeqOrString::Seq(values)) => Ok(values),
        Some(SeqOrString::Str(s)) if s.is_empty() => Ok(Vec::new()),
        Some(SeqOrString::Str(s)) => Err(serde::de::Error::custom(format!(
            "expected an array or an empty string, found {s:?}"
        ))),
    }
}

pub(crate) fn empty_string_is_none<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<SeqOrString<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(SeqOrString::Seq(values)) => Ok(Some(values)),
        Some(SeqOrString::Str(s)) if s.is_empty() => Ok(None),
        Some(SeqOrString::Str(s)) => Err(serde::de::Error::custom(format!(
            "expected an array or an empty string, found {s:?}"
        ))),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

/// Tournament speed is an array, but older producers emit a single object.
pub(crate) fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(OneOrMany::Many(values)) => Ok(values),
        Some(OneOrMany::One(value)) => Ok(vec![value]),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Timelike};

    use super::*;

    #[test]
    fn test_parse_timestamp_variants() {
        let expected = Utc.with_ymd_and_hms(2020, 4, 7, 14, 32, 50).unwrap();
        assert_eq!(parse_timestamp("2020-04-07T14:32:50Z").unwrap(), expected);
        assert_eq!(parse_timestamp("2020-04-07T16:32:50+02:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2020-04-07T14:32:50").unwrap(), expected);
        assert!(parse_timestamp("07/04/2020 14:32").is_err());
    }

    #[test]
    fn test_format_timestamp_keeps_fraction() {
        let whole = Utc.with_ymd_and_hms(2021, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_timestamp(&whole), "2021-01-02T03:04:05Z");

        let fractional = whole.with_nanosecond(250_000_000).unwrap();
        let text = format_timestamp(&fractional);
        assert_eq!(text, "2021-01-02T03:04:05.250Z");
        assert_eq!(parse_timestamp(&text).unwrap(), fractional);
    }
}
