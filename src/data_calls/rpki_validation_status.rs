//! The `rpki-validation` data call
//!
//! RPKI validity state for an ASN/prefix combination, looked up against the
//! RIPE NCC RPKI validator, together with the validating ROAs.
//!
//! Reference: <https://stat.ripe.net/docs/data_api#rpki-validation>

use std::fmt;

use ipnet::IpNet;
use serde::Deserialize;

use crate::client::RipeStat;
use crate::de;
use crate::error::Result;
use crate::types::normalize_prefix;

pub(crate) const PATH: &str = "rpki-validation";
pub(crate) const VERSION: &str = "0.2";

pub(crate) async fn fetch(
    client: &RipeStat,
    resource: u32,
    prefix: IpNet,
) -> Result<RpkiValidationStatus> {
    let params = vec![
        ("preferred_version", VERSION.to_owned()),
        ("resource", resource.to_string()),
        ("prefix", normalize_prefix(prefix).to_string()),
    ];

    let envelope = client.get(PATH, params).await?;
    Ok(serde_json::from_value(envelope.data)?)
}

/// RPKI validity state of an announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RpkiStatus {
    /// The announcement matches a ROA and is valid
    Valid,
    /// A ROA with the same (or covering) prefix exists, but for another ASN
    InvalidAsn,
    /// The announced prefix is longer than the ROA's maximum length
    InvalidLength,
    /// No ROA found for the announcement
    Unknown,
}

impl fmt::Display for RpkiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => write!(f, "valid"),
            Self::InvalidAsn => write!(f, "invalid_asn"),
            Self::InvalidLength => write!(f, "invalid_length"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A ROA considered during validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Roa {
    #[serde(deserialize_with = "de::from_string_or_number")]
    pub origin: u32,
    pub prefix: IpNet,
    pub validity: String,
    /// Trust anchor the ROA came from, e.g. `RIPE NCC RPKI Root`
    pub source: String,
    pub max_length: u8,
}

/// Response of the RPKI validation data call.
#[derive(Debug, Clone, Deserialize)]
pub struct RpkiValidationStatus {
    pub status: RpkiStatus,
    #[serde(default)]
    pub validating_roas: Vec<Roa>,
    /// ASN the lookup was based on
    #[serde(deserialize_with = "de::from_string_or_number")]
    pub resource: u32,
    /// Prefix the lookup was based on
    pub prefix: IpNet,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_recorded_payload() {
        let data = json!({
            "validating_roas": [
                {
                    "origin": "3333",
                    "prefix": "193.0.0.0/21",
                    "validity": "valid",
                    "source": "RIPE NCC RPKI Root",
                    "max_length": 21
                }
            ],
            "status": "valid",
            "resource": "3333",
            "prefix": "193.0.0.0/21"
        });

        let response: RpkiValidationStatus = serde_json::from_value(data).unwrap();
        assert_eq!(response.status, RpkiStatus::Valid);
        assert_eq!(response.resource, 3333);
        assert_eq!(response.prefix, "193.0.0.0/21".parse::<IpNet>().unwrap());

        let roa = &response.validating_roas[0];
        assert_eq!(roa.origin, 3333);
        assert_eq!(roa.max_length, 21);
        assert_eq!(roa.source, "RIPE NCC RPKI Root");
    }

    #[test]
    fn decodes_all_status_variants() {
        for (raw, expected) in [
            ("valid", RpkiStatus::Valid),
            ("invalid_asn", RpkiStatus::InvalidAsn),
            ("invalid_length", RpkiStatus::InvalidLength),
            ("unknown", RpkiStatus::Unknown),
        ] {
            let status: RpkiStatus = serde_json::from_value(json!(raw)).unwrap();
            assert_eq!(status, expected);
            assert_eq!(status.to_string(), raw);
        }
    }

    #[test]
    fn missing_roas_defaults_to_empty() {
        let data = json!({
            "status": "unknown",
            "resource": 64496,
            "prefix": "198.51.100.0/24"
        });

        let response: RpkiValidationStatus = serde_json::from_value(data).unwrap();
        assert_eq!(response.status, RpkiStatus::Unknown);
        assert!(response.validating_roas.is_empty());
    }
}
