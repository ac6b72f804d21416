//! The `asn-neighbours` data call
//!
//! Network neighbours observed for an ASN: statistics, the neighbour list
//! and, at the full level of detail, the AS paths the data is based on.
//!
//! Reference: <https://stat.ripe.net/docs/data_api#asn-neighbours>

use chrono::NaiveDateTime;
use serde::Deserialize;

use super::format_time;
use crate::client::RipeStat;
use crate::de;
use crate::error::Result;

pub(crate) const PATH: &str = "asn-neighbours";
pub(crate) const VERSION: &str = "4.1";

/// How much detail the call returns per neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelOfDetail {
    /// Neighbour list and counts only (`lod=0`)
    #[default]
    Summary,
    /// Include peer counts and the observed AS paths (`lod=1`)
    Full,
}

impl LevelOfDetail {
    fn as_param(self) -> &'static str {
        match self {
            Self::Summary => "0",
            Self::Full => "1",
        }
    }
}

/// Request builder for the neighbours of an ASN.
#[derive(Debug, Clone)]
pub struct AsnNeighboursRequest<'a> {
    client: &'a RipeStat,
    resource: u32,
    lod: LevelOfDetail,
    query_time: Option<NaiveDateTime>,
}

impl<'a> AsnNeighboursRequest<'a> {
    pub(crate) fn new(client: &'a RipeStat, resource: u32) -> Self {
        Self {
            client,
            resource,
            lod: LevelOfDetail::default(),
            query_time: None,
        }
    }

    /// Level of detail; [`LevelOfDetail::Full`] adds per-path details.
    pub fn lod(mut self, lod: LevelOfDetail) -> Self {
        self.lod = lod;
        self
    }

    /// Query a historical point in time (default: latest available data).
    pub fn query_time(mut self, query_time: NaiveDateTime) -> Self {
        self.query_time = Some(query_time);
        self
    }

    /// Execute the data call.
    pub async fn fetch(self) -> Result<AsnNeighbours> {
        let mut params = vec![
            ("preferred_version", VERSION.to_owned()),
            ("resource", self.resource.to_string()),
            ("lod", self.lod.as_param().to_owned()),
        ];
        if let Some(query_time) = self.query_time {
            params.push(("query_time", format_time(query_time)));
        }

        let envelope = self.client.get(PATH, params).await?;
        Ok(serde_json::from_value(envelope.data)?)
    }
}

/// Which side of the AS paths a neighbour was seen on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Left,
    Right,
    Uncertain,
    #[serde(other)]
    Unknown,
}

/// Peer counts per IP version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PeerCount {
    pub v4: u32,
    pub v6: u32,
}

/// An RRC location where a path was observed, with the peers seeing it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PathLocation {
    /// Collector identifier, e.g. `rrc03`
    pub location: String,
    pub peer_count: u32,
}

/// An observed AS path involving the neighbour.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NeighbourPath {
    #[serde(deserialize_with = "de::as_path")]
    pub path: Vec<u32>,
    pub locations: PathLocations,
}

/// Locations of an observed path, split by IP version.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PathLocations {
    #[serde(default)]
    pub v4: Vec<PathLocation>,
    #[serde(default)]
    pub v6: Vec<PathLocation>,
}

/// Details returned at [`LevelOfDetail::Full`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NeighbourDetails {
    /// Peers seeing this neighbour/position combination
    pub peer_count: PeerCount,
    /// Number of paths the combination was seen in
    pub path_count: u32,
    pub paths: Vec<NeighbourPath>,
}

/// A single observed neighbour.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Neighbour {
    #[serde(deserialize_with = "de::from_string_or_number")]
    pub asn: u32,
    pub position: Position,
    /// Only present at [`LevelOfDetail::Full`]
    #[serde(default)]
    pub details: Option<NeighbourDetails>,
}

/// Totals over the neighbour list.
///
/// Left neighbours seen only as direct peers of a RIS collector are counted
/// as `uncertain`, since the collector's own peering could artificially
/// introduce them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct NeighbourCounts {
    pub left: u32,
    pub right: u32,
    pub uncertain: u32,
    pub unique: u32,
}

/// Response of the ASN neighbours data call.
#[derive(Debug, Clone, Deserialize)]
pub struct AsnNeighbours {
    pub neighbours: Vec<Neighbour>,
    pub neighbour_counts: NeighbourCounts,
    /// ASN the query was based on
    #[serde(deserialize_with = "de::from_string_or_number")]
    pub resource: u32,
    /// Level of detail the server answered with (0 or 1)
    #[serde(deserialize_with = "de::from_string_or_number")]
    pub lod: u8,
    pub query_time: NaiveDateTime,
    pub latest_time: NaiveDateTime,
    pub earliest_time: NaiveDateTime,
}

impl AsnNeighbours {
    pub fn len(&self) -> usize {
        self.neighbours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbours.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Neighbour> {
        self.neighbours.iter()
    }
}

impl IntoIterator for AsnNeighbours {
    type Item = Neighbour;
    type IntoIter = std::vec::IntoIter<Neighbour>;

    fn into_iter(self) -> Self::IntoIter {
        self.neighbours.into_iter()
    }
}

impl<'a> IntoIterator for &'a AsnNeighbours {
    type Item = &'a Neighbour;
    type IntoIter = std::slice::Iter<'a, Neighbour>;

    fn into_iter(self) -> Self::IntoIter {
        self.neighbours.iter()
    }
}
