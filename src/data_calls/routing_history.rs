//! The `routing-history` data call
//!
//! History of announcements for prefixes, grouped by origin ASN, including
//! the timelines during which each route was visible.
//!
//! Reference: <https://stat.ripe.net/docs/data_api#routing-history>

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use ipnet::IpNet;
use serde::Deserialize;

use super::announced_prefixes::Timeline;
use super::format_time;
use crate::client::RipeStat;
use crate::error::Result;
use crate::types::Resource;

pub(crate) const PATH: &str = "routing-history";
pub(crate) const VERSION: &str = "2.3";

/// Request builder for the routing history of an ASN or prefix.
#[derive(Debug, Clone)]
pub struct RoutingHistoryRequest<'a> {
    client: &'a RipeStat,
    resource: Resource,
    starttime: Option<NaiveDateTime>,
    endtime: Option<NaiveDateTime>,
    min_peers: Option<u32>,
    max_rows: Option<u32>,
    include_first_hop: bool,
    normalise_visibility: bool,
}

impl<'a> RoutingHistoryRequest<'a> {
    pub(crate) fn new(client: &'a RipeStat, resource: Resource) -> Self {
        Self {
            client,
            resource,
            starttime: None,
            endtime: None,
            min_peers: None,
            max_rows: None,
            include_first_hop: false,
            normalise_visibility: false,
        }
    }

    /// Start of the query period (defaults to two weeks ago, server-side).
    pub fn starttime(mut self, starttime: NaiveDateTime) -> Self {
        self.starttime = Some(starttime);
        self
    }

    /// End of the query period.
    pub fn endtime(mut self, endtime: NaiveDateTime) -> Self {
        self.endtime = Some(endtime);
        self
    }

    /// Minimum number of full-feed RIS peers seeing the route for a segment
    /// to be included (default 10).
    pub fn min_peers(mut self, min_peers: u32) -> Self {
        self.min_peers = Some(min_peers);
        self
    }

    /// Soft limit on returned routes (default 3000): all recorded routes of
    /// an origin are returned, but no further origins once the limit is hit.
    pub fn max_rows(mut self, max_rows: u32) -> Self {
        self.max_rows = Some(max_rows);
        self
    }

    /// Include the first hop ASN in the route, not just the origin.
    pub fn include_first_hop(mut self, include: bool) -> Self {
        self.include_first_hop = include;
        self
    }

    /// Add a `visibility` field to each timeline: peers seeing the route
    /// divided by the RIS full-table peer count at that time.
    pub fn normalise_visibility(mut self, normalise: bool) -> Self {
        self.normalise_visibility = normalise;
        self
    }

    /// Execute the data call.
    pub async fn fetch(self) -> Result<RoutingHistory> {
        let mut params = vec![
            ("preferred_version", VERSION.to_owned()),
            ("resource", self.resource.to_string()),
        ];
        if let Some(starttime) = self.starttime {
            params.push(("starttime", format_time(starttime)));
        }
        if let Some(endtime) = self.endtime {
            params.push(("endtime", format_time(endtime)));
        }
        if let Some(min_peers) = self.min_peers {
            params.push(("min_peers", min_peers.to_string()));
        }
        if let Some(max_rows) = self.max_rows {
            params.push(("max_rows", max_rows.to_string()));
        }
        if self.include_first_hop {
            params.push(("include_first_hop", "true".to_owned()));
        }
        if self.normalise_visibility {
            params.push(("normalise_visibility", "true".to_owned()));
        }

        let envelope = self.client.get(PATH, params).await?;
        Ok(serde_json::from_value(envelope.data)?)
    }
}

/// Announcement history of one prefix.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PrefixHistory {
    pub prefix: IpNet,
    pub timelines: Vec<Timeline>,
}

/// Routes recorded for one origin ASN.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OriginHistory {
    /// Origin ASN; with `include_first_hop` the server may return a
    /// `first-hop origin` pair, so the raw string form is kept
    pub origin: String,
    pub prefixes: Vec<PrefixHistory>,
}

/// Response of the routing history data call.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutingHistory {
    pub by_origin: Vec<OriginHistory>,
    /// Resource the query was based on (ASN or prefix), echoed as a string
    pub resource: String,
    pub query_starttime: NaiveDateTime,
    pub query_endtime: NaiveDateTime,
    /// Maximum full-table peer count per IP version seen in RIS
    #[serde(default)]
    pub latest_max_ff_peers: BTreeMap<String, u32>,
}

impl RoutingHistory {
    /// Number of origins in the history.
    pub fn len(&self) -> usize {
        self.by_origin.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_origin.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OriginHistory> {
        self.by_origin.iter()
    }

    /// Origin ASNs included in the response.
    pub fn origins(&self) -> impl Iterator<Item = &str> {
        self.by_origin.iter().map(|origin| origin.origin.as_str())
    }

    /// The queried resource parsed back into its typed form.
    pub fn resource(&self) -> Result<Resource> {
        self.resource.parse()
    }
}

impl IntoIterator for RoutingHistory {
    type Item = OriginHistory;
    type IntoIter = std::vec::IntoIter<OriginHistory>;

    fn into_iter(self) -> Self::IntoIter {
        self.by_origin.into_iter()
    }
}

impl<'a> IntoIterator for &'a RoutingHistory {
    type Item = &'a OriginHistory;
    type IntoIter = std::slice::Iter<'a, OriginHistory>;

    fn into_iter(self) -> Self::IntoIter {
        self.by_origin.iter()
    }
}
