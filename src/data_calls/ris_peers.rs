//! The `ris-peers` data call
//!
//! The peers of RIS (ASN, IP address, shared route counts), grouped by route
//! collector. Historical lookups align to the RIS collection times (00:00,
//! 08:00 and 16:00 UTC); by default the latest data is returned.
//!
//! Reference: <https://stat.ripe.net/docs/data_api#ris-peers>

use std::collections::BTreeMap;
use std::net::IpAddr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};

use super::format_time;
use crate::client::RipeStat;
use crate::de;
use crate::error::Result;

pub(crate) const PATH: &str = "ris-peers";
pub(crate) const VERSION: &str = "1.0";

/// Request builder for the RIS peer listing.
#[derive(Debug, Clone)]
pub struct RisPeersRequest<'a> {
    client: &'a RipeStat,
    query_time: Option<NaiveDateTime>,
}

impl<'a> RisPeersRequest<'a> {
    pub(crate) fn new(client: &'a RipeStat) -> Self {
        Self {
            client,
            query_time: None,
        }
    }

    /// Time of the lookup; the server aligns it to a RIS collection time.
    pub fn query_time(mut self, query_time: NaiveDateTime) -> Self {
        self.query_time = Some(query_time);
        self
    }

    /// Execute the data call.
    pub async fn fetch(self) -> Result<RisPeers> {
        let mut params = vec![("preferred_version", VERSION.to_owned())];
        if let Some(query_time) = self.query_time {
            params.push(("query_time", format_time(query_time)));
        }

        let envelope = self.client.get(PATH, params).await?;
        Ok(serde_json::from_value(envelope.data)?)
    }
}

/// A single RIS peer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RisPeer {
    #[serde(deserialize_with = "de::from_string_or_number")]
    pub asn: u32,
    pub ip: IpAddr,
    pub v4_prefix_count: u32,
    pub v6_prefix_count: u32,
}

/// Upper-case the collector keys; the API emits `rrc18`, historical
/// consumers expect `RRC18`.
fn rrc_map<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, Vec<RisPeer>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, Vec<RisPeer>> = BTreeMap::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(rrc, peers)| (rrc.to_ascii_uppercase(), peers))
        .collect())
}

/// Query parameters echoed by the server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RisPeersParameters {
    pub query_time: NaiveDateTime,
}

/// Response of the RIS peers data call.
#[derive(Debug, Clone, Deserialize)]
pub struct RisPeers {
    /// Peers per collector, keyed by upper-cased RRC name
    #[serde(deserialize_with = "rrc_map")]
    pub peers: BTreeMap<String, Vec<RisPeer>>,
    pub latest_time: NaiveDateTime,
    pub earliest_time: NaiveDateTime,
    pub parameters: RisPeersParameters,
}

impl RisPeers {
    /// The collection time the lookup was aligned to.
    pub fn query_time(&self) -> NaiveDateTime {
        self.parameters.query_time
    }

    /// Collector names in the dataset.
    pub fn collectors(&self) -> impl Iterator<Item = &str> {
        self.peers.keys().map(String::as_str)
    }

    /// Peers of a single collector (name is case-insensitive).
    pub fn collector(&self, rrc: &str) -> Option<&[RisPeer]> {
        self.peers
            .get(&rrc.to_ascii_uppercase())
            .map(Vec::as_slice)
    }

    /// All peers across every collector.
    pub fn all_peers(&self) -> impl Iterator<Item = &RisPeer> {
        self.peers.values().flat_map(|peers| peers.iter())
    }
}
