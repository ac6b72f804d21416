//! Serde helpers for the API's loosely typed fields
//!
//! RIPEstat is inconsistent about numeric encoding: the same field can arrive
//! as a JSON number (`"asn": 1853`) or a quoted string (`"asn": "13041"`),
//! and AS paths and communities come as space-separated strings.

use std::fmt::Display;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrString<T> {
    Num(T),
    Str(String),
}

/// Deserialize a number that may be quoted as a string.
pub(crate) fn from_string_or_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    match NumOrString::<T>::deserialize(deserializer)? {
        NumOrString::Num(value) => Ok(value),
        NumOrString::Str(raw) => raw.trim().parse().map_err(D::Error::custom),
    }
}

/// Deserialize a list of numbers that may each be quoted as strings.
pub(crate) fn vec_from_string_or_number<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    let raw: Vec<NumOrString<T>> = Vec::deserialize(deserializer)?;
    raw.into_iter()
        .map(|entry| match entry {
            NumOrString::Num(value) => Ok(value),
            NumOrString::Str(raw) => raw.trim().parse().map_err(D::Error::custom),
        })
        .collect()
}

/// Deserialize a space-separated AS path (`"34854 6939 1205"`) into ASNs.
pub(crate) fn as_path<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.split_whitespace()
        .map(|hop| hop.parse().map_err(D::Error::custom))
        .collect()
}

/// Deserialize a space-separated string list (e.g. BGP communities).
pub(crate) fn space_separated<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.split_whitespace().map(str::to_owned).collect())
}

/// Lenient optional integer: unparseable strings (e.g. `"not available"`)
/// become `None` instead of failing the whole envelope.
pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumOrString<i64>>::deserialize(deserializer)? {
        Some(NumOrString::Num(value)) => Ok(Some(value)),
        Some(NumOrString::Str(raw)) => Ok(raw.trim().parse().ok()),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Probe {
        #[serde(deserialize_with = "super::from_string_or_number")]
        asn: u32,
        #[serde(deserialize_with = "super::as_path")]
        as_path: Vec<u32>,
        #[serde(deserialize_with = "super::space_separated")]
        community: Vec<String>,
    }

    #[test]
    fn quoted_and_plain_numbers_decode() {
        let quoted: Probe = serde_json::from_str(
            r#"{"asn": "13041", "as_path": "34854 6939 1205", "community": "34854:1009"}"#,
        )
        .unwrap();
        assert_eq!(quoted.asn, 13041);
        assert_eq!(quoted.as_path, vec![34854, 6939, 1205]);
        assert_eq!(quoted.community, vec!["34854:1009"]);

        let plain: Probe =
            serde_json::from_str(r#"{"asn": 1853, "as_path": "1853", "community": ""}"#).unwrap();
        assert_eq!(plain.asn, 1853);
        assert_eq!(plain.as_path, vec![1853]);
        assert!(plain.community.is_empty());
    }

    #[test]
    fn bad_numeric_string_is_an_error() {
        let result: Result<Probe, _> = serde_json::from_str(
            r#"{"asn": "not-an-asn", "as_path": "1", "community": ""}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn lenient_i64_swallows_placeholder_strings() {
        #[derive(Deserialize)]
        struct Envelope {
            #[serde(default, deserialize_with = "super::lenient_i64")]
            process_time: Option<i64>,
        }

        let with_number: Envelope = serde_json::from_str(r#"{"process_time": 79}"#).unwrap();
        assert_eq!(with_number.process_time, Some(79));

        let with_text: Envelope =
            serde_json::from_str(r#"{"process_time": "not available"}"#).unwrap();
        assert_eq!(with_text.process_time, None);

        let missing: Envelope = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.process_time, None);
    }
}
