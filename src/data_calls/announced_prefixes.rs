//! The `announced-prefixes` data call
//!
//! All announced prefixes for a given ASN, with the timelines during which
//! each prefix was visible. Results can be restricted to a time period.
//!
//! Reference: <https://stat.ripe.net/docs/data_api#announced-prefixes>

use chrono::NaiveDateTime;
use ipnet::IpNet;
use serde::Deserialize;

use super::format_time;
use crate::client::RipeStat;
use crate::de;
use crate::error::Result;

pub(crate) const PATH: &str = "announced-prefixes";
pub(crate) const VERSION: &str = "1.2";

/// Request builder for the announced prefixes of an ASN.
#[derive(Debug, Clone)]
pub struct AnnouncedPrefixesRequest<'a> {
    client: &'a RipeStat,
    resource: u32,
    starttime: Option<NaiveDateTime>,
    endtime: Option<NaiveDateTime>,
    min_peers_seeing: Option<u32>,
}

impl<'a> AnnouncedPrefixesRequest<'a> {
    pub(crate) fn new(client: &'a RipeStat, resource: u32) -> Self {
        Self {
            client,
            resource,
            starttime: None,
            endtime: None,
            min_peers_seeing: None,
        }
    }

    /// Start of the query period (defaults to two weeks ago, server-side).
    pub fn starttime(mut self, starttime: NaiveDateTime) -> Self {
        self.starttime = Some(starttime);
        self
    }

    /// End of the query period (defaults to now, server-side).
    pub fn endtime(mut self, endtime: NaiveDateTime) -> Self {
        self.endtime = Some(endtime);
        self
    }

    /// Minimum number of RIS peers seeing a prefix for it to be included.
    /// Filters out low-visibility and localized announcements (default 10).
    pub fn min_peers_seeing(mut self, min_peers_seeing: u32) -> Self {
        self.min_peers_seeing = Some(min_peers_seeing);
        self
    }

    /// Execute the data call.
    pub async fn fetch(self) -> Result<AnnouncedPrefixes> {
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
        if let Some(min_peers_seeing) = self.min_peers_seeing {
            params.push(("min_peers_seeing", min_peers_seeing.to_string()));
        }

        let envelope = self.client.get(PATH, params).await?;
        Ok(serde_json::from_value(envelope.data)?)
    }
}

/// Interval during which a route was visible.
///
/// `visibility` is only present on `routing-history` responses queried with
/// visibility normalisation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Timeline {
    pub starttime: NaiveDateTime,
    pub endtime: NaiveDateTime,
    #[serde(default)]
    pub visibility: Option<f64>,
}

/// A prefix announced by the queried ASN.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnnouncedPrefix {
    pub prefix: IpNet,
    pub timelines: Vec<Timeline>,
}

/// Response of the announced prefixes data call.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnouncedPrefixes {
    pub prefixes: Vec<AnnouncedPrefix>,
    pub query_starttime: NaiveDateTime,
    pub query_endtime: NaiveDateTime,
    /// ASN the query was based on
    #[serde(deserialize_with = "de::from_string_or_number")]
    pub resource: u32,
    /// Latest time data is available for
    pub latest_time: NaiveDateTime,
    /// Earliest time data is available for
    pub earliest_time: NaiveDateTime,
}

impl AnnouncedPrefixes {
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnnouncedPrefix> {
        self.prefixes.iter()
    }
}

impl IntoIterator for AnnouncedPrefixes {
    type Item = AnnouncedPrefix;
    type IntoIter = std::vec::IntoIter<AnnouncedPrefix>;

    fn into_iter(self) -> Self::IntoIter {
        self.prefixes.into_iter()
    }
}

impl<'a> IntoIterator for &'a AnnouncedPrefixes {
    type Item = &'a AnnouncedPrefix;
    type IntoIter = std::slice::Iter<'a, AnnouncedPrefix>;

    fn into_iter(self) -> Self::IntoIter {
        self.prefixes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_data() -> serde_json::Value {
        json!({
            "prefixes": [
                {
                    "prefix": "193.0.10.0/23",
                    "timelines": [
                        {"starttime": "2011-12-12T16:00:00", "endtime": "2011-12-31T16:00:00"},
                        {"starttime": "2015-12-17T00:00:00", "endtime": "2021-04-14T16:00:00"}
                    ]
                }
            ],
            "query_starttime": "2011-12-12T12:00:00",
            "query_endtime": "2021-04-14T16:00:00",
            "resource": "3333",
            "latest_time": "2021-04-14T16:00:00",
            "earliest_time": "2000-08-01T00:00:00"
        })
    }

    #[test]
    fn decodes_recorded_payload() {
        let response: AnnouncedPrefixes = serde_json::from_value(sample_data()).unwrap();

        assert_eq!(response.resource, 3333);
        assert_eq!(response.len(), 1);
        assert!(!response.is_empty());

        let announced = &response.prefixes[0];
        assert_eq!(announced.prefix, "193.0.10.0/23".parse::<IpNet>().unwrap());
        assert_eq!(announced.timelines.len(), 2);
        assert_eq!(
            announced.timelines[0].starttime,
            "2011-12-12T16:00:00".parse::<NaiveDateTime>().unwrap()
        );
        assert!(announced.timelines[0].visibility.is_none());
    }

    #[test]
    fn iterates_by_reference_and_value() {
        let response: AnnouncedPrefixes = serde_json::from_value(sample_data()).unwrap();

        let borrowed: Vec<_> = response.iter().map(|p| p.prefix).collect();
        assert_eq!(borrowed.len(), 1);

        let owned: Vec<_> = response.into_iter().collect();
        assert_eq!(owned.len(), 1);
    }
}
