//! The `looking-glass` data call
//!
//! Near real-time BGP routing table views for a prefix, structured by RIS
//! route collector (RRC) with the location and the BGP peers providing the
//! routing information.
//!
//! Reference: <https://stat.ripe.net/docs/data_api#looking-glass>

use std::net::IpAddr;

use chrono::NaiveDateTime;
use ipnet::IpNet;
use serde::Deserialize;

use crate::client::RipeStat;
use crate::de;
use crate::error::Result;
use crate::types::normalize_prefix;

pub(crate) const PATH: &str = "looking-glass";
pub(crate) const VERSION: &str = "2.1";

pub(crate) async fn fetch(client: &RipeStat, prefix: IpNet) -> Result<LookingGlass> {
    let params = vec![
        ("preferred_version", VERSION.to_owned()),
        ("resource", normalize_prefix(prefix).to_string()),
    ];

    let envelope = client.get(PATH, params).await?;
    Ok(serde_json::from_value(envelope.data)?)
}

/// A BGP peer's view of the queried prefix.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Peer {
    /// Origin ASN of the announcement
    #[serde(deserialize_with = "de::from_string_or_number")]
    pub asn_origin: u32,
    /// AS path as seen by this peer
    #[serde(deserialize_with = "de::as_path")]
    pub as_path: Vec<u32>,
    /// BGP communities on the announcement
    #[serde(deserialize_with = "de::space_separated")]
    pub community: Vec<String>,
    pub last_updated: NaiveDateTime,
    pub prefix: IpNet,
    /// Address of the peer itself
    pub peer: IpAddr,
    /// BGP origin attribute (e.g. `IGP`)
    pub origin: String,
    pub next_hop: IpAddr,
    pub latest_time: NaiveDateTime,
}

/// A route collector (RRC) entry with the peers that see the prefix.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Collector {
    /// Collector identifier, e.g. `RRC00`
    pub rrc: String,
    /// Collector location, e.g. `Amsterdam, Netherlands`
    pub location: String,
    pub peers: Vec<Peer>,
}

/// Response of the looking glass data call.
#[derive(Debug, Clone, Deserialize)]
pub struct LookingGlass {
    pub rrcs: Vec<Collector>,
    /// When the query was performed
    pub query_time: NaiveDateTime,
    /// How recent the data is
    pub latest_time: NaiveDateTime,
}

impl LookingGlass {
    /// Number of collectors that see the prefix.
    pub fn len(&self) -> usize {
        self.rrcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rrcs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Collector> {
        self.rrcs.iter()
    }

    /// Look up a collector by its identifier (case-insensitive).
    pub fn collector(&self, rrc: &str) -> Option<&Collector> {
        self.rrcs.iter().find(|c| c.rrc.eq_ignore_ascii_case(rrc))
    }

    /// All peers across every collector.
    pub fn peers(&self) -> impl Iterator<Item = &Peer> {
        self.rrcs.iter().flat_map(|c| c.peers.iter())
    }
}

impl IntoIterator for LookingGlass {
    type Item = Collector;
    type IntoIter = std::vec::IntoIter<Collector>;

    fn into_iter(self) -> Self::IntoIter {
        self.rrcs.into_iter()
    }
}

impl<'a> IntoIterator for &'a LookingGlass {
    type Item = &'a Collector;
    type IntoIter = std::slice::Iter<'a, Collector>;

    fn into_iter(self) -> Self::IntoIter {
        self.rrcs.iter()
    }
}
