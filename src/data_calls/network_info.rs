//! The `network-info` data call
//!
//! The containing prefix and announcing ASNs of a given IP address.
//!
//! Reference: <https://stat.ripe.net/docs/data_api#network-info>

use std::net::IpAddr;

use ipnet::IpNet;
use serde::Deserialize;

use crate::client::RipeStat;
use crate::de;
use crate::error::Result;

pub(crate) const PATH: &str = "network-info";
pub(crate) const VERSION: &str = "1.0";

pub(crate) async fn fetch(client: &RipeStat, resource: IpAddr) -> Result<NetworkInfo> {
    let params = vec![
        ("preferred_version", VERSION.to_owned()),
        ("resource", resource.to_string()),
    ];

    let envelope = client.get(PATH, params).await?;
    Ok(serde_json::from_value(envelope.data)?)
}

/// Response of the network info data call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NetworkInfo {
    /// ASNs the prefix is announced from
    #[serde(deserialize_with = "de::vec_from_string_or_number")]
    pub asns: Vec<u32>,
    /// Prefix the queried address belongs to
    pub prefix: IpNet,
}
