//! The `address-space-hierarchy` data call
//!
//! Address space objects (inetnum/inet6num) from the RIPE Database around a
//! queried prefix. Less and more specific results are first-level only.
//!
//! Reference: <https://stat.ripe.net/docs/data_api#address-space-hierarchy>

use chrono::NaiveDateTime;
use ipnet::IpNet;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::client::RipeStat;
use crate::error::Result;
use crate::types::normalize_prefix;

pub(crate) const PATH: &str = "address-space-hierarchy";
pub(crate) const VERSION: &str = "1.3";

/// An inetnum/inet6num object, kept as the raw RPSL attribute map.
///
/// The attribute set is open-ended (`netname`, `descr`, `country`,
/// `mnt-by`, ...), so no fixed struct is imposed on it.
pub type Inetnum = Map<String, Value>;

pub(crate) async fn fetch(client: &RipeStat, resource: IpNet) -> Result<AddressSpaceHierarchy> {
    let params = vec![
        ("preferred_version", VERSION.to_owned()),
        ("resource", normalize_prefix(resource).to_string()),
    ];

    let envelope = client.get(PATH, params).await?;
    Ok(serde_json::from_value(envelope.data)?)
}

/// Response of the address space hierarchy data call.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressSpaceHierarchy {
    /// RIR the results are from
    pub rir: String,
    /// Prefix the query was based on
    pub resource: IpNet,
    /// Exact matches for the queried resource
    #[serde(default)]
    pub exact: Vec<Inetnum>,
    /// First-level more specific blocks underneath the queried resource
    #[serde(default)]
    pub more_specific: Vec<Inetnum>,
    /// First-level less specific (parent) blocks above the queried resource
    #[serde(default)]
    pub less_specific: Vec<Inetnum>,
    pub query_time: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_recorded_payload() {
        let data = json!({
            "rir": "ripe",
            "resource": "193.0.0.0/21",
            "exact": [
                {
                    "inetnum": "193.0.0.0 - 193.0.7.255",
                    "netname": "RIPE-NCC",
                    "descr": "RIPE Network Coordination Centre, Amsterdam, Netherlands",
                    "org": "ORG-RIEN1-RIPE",
                    "country": "NL",
                    "status": "ASSIGNED PA",
                    "mnt-by": "RIPE-NCC-MNT",
                    "source": "RIPE"
                }
            ],
            "less_specific": [
                {
                    "inetnum": "193.0.0.0 - 193.0.23.255",
                    "netname": "NL-RIPENCC-OPS-990305",
                    "country": "NL",
                    "status": "ALLOCATED PA"
                }
            ],
            "more_specific": [],
            "query_time": "2021-04-23T16:00:00"
        });

        let response: AddressSpaceHierarchy = serde_json::from_value(data).unwrap();
        assert_eq!(response.rir, "ripe");
        assert_eq!(response.resource, "193.0.0.0/21".parse::<IpNet>().unwrap());
        assert_eq!(response.exact.len(), 1);
        assert_eq!(response.exact[0]["netname"], "RIPE-NCC");
        assert_eq!(response.less_specific[0]["status"], "ALLOCATED PA");
        assert!(response.more_specific.is_empty());
    }
}
