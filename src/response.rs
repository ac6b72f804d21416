//! The RIPEstat response envelope
//!
//! Every data call wraps its payload in the same JSON envelope: server-side
//! diagnostics (`messages`), call metadata, and the call-specific `data`
//! object. The envelope is decoded once here; each data call then decodes
//! `data` into its own typed response.

use std::fmt;

use chrono::NaiveDateTime;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::de;

/// Severity tag on an envelope message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
    /// Severity string this client does not know about
    Other(String),
}

impl From<&str> for Severity {
    fn from(raw: &str) -> Self {
        match raw {
            "info" => Self::Info,
            "warning" => Self::Warning,
            "error" => Self::Error,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
            Self::Other(other) => write!(f, "{other}"),
        }
    }
}

/// A server-side diagnostic attached to a response.
///
/// The API encodes these as two-element arrays, e.g.
/// `["info", "Query time has been set to the latest time ..."]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub severity: Severity,
    pub text: String,
}

impl<'de> Deserialize<'de> for Message {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parts: Vec<String> = Vec::deserialize(deserializer)?;
        let mut parts = parts.into_iter();
        let severity = parts
            .next()
            .ok_or_else(|| D::Error::custom("empty message entry"))?;
        let text = parts.collect::<Vec<_>>().join(" ");

        Ok(Self {
            severity: Severity::from(severity.as_str()),
            text,
        })
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.text)
    }
}

/// Decoded response envelope for a data call.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub see_also: Vec<Value>,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub data_call_name: Option<String>,
    #[serde(default)]
    pub data_call_status: String,
    #[serde(default)]
    pub cached: bool,
    /// Call-specific payload, decoded further by the data call modules
    pub data: Value,
    #[serde(default)]
    pub query_id: String,
    #[serde(default, deserialize_with = "de::lenient_i64")]
    pub process_time: Option<i64>,
    #[serde(default)]
    pub server_id: String,
    #[serde(default)]
    pub build_version: String,
    pub status: String,
    pub status_code: u16,
    #[serde(default)]
    pub time: Option<NaiveDateTime>,
}

impl ApiResponse {
    /// Whether the server reported the call as successful.
    pub fn is_ok(&self) -> bool {
        self.status_code == 200 && self.status == "ok"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_decodes_with_messages() {
        let body = json!({
            "messages": [
                ["info", "Query time has been set to the latest time data is available for."]
            ],
            "see_also": [],
            "version": "1.0",
            "data_call_status": "supported",
            "cached": false,
            "data": {"ip": "1.1.1.1"},
            "query_id": "20210417171436-e34a045f-482f-43ce-b99e-109c2962f207",
            "process_time": 29,
            "server_id": "app138",
            "build_version": "live.2021.4.14.157",
            "status": "ok",
            "status_code": 200,
            "time": "2021-04-17T17:14:36.207593"
        });

        let envelope: ApiResponse = serde_json::from_value(body).unwrap();
        assert!(envelope.is_ok());
        assert_eq!(envelope.messages.len(), 1);
        assert_eq!(envelope.messages[0].severity, Severity::Info);
        assert!(envelope.messages[0].text.starts_with("Query time"));
        assert_eq!(envelope.process_time, Some(29));
        assert_eq!(envelope.data["ip"], "1.1.1.1");
    }

    #[test]
    fn error_envelope_is_not_ok() {
        let body = json!({
            "messages": [["error", "Invalid resource"]],
            "data": {},
            "status": "error",
            "status_code": 400
        });

        let envelope: ApiResponse = serde_json::from_value(body).unwrap();
        assert!(!envelope.is_ok());
        assert_eq!(envelope.messages[0].severity, Severity::Error);
    }

    #[test]
    fn unknown_severity_is_preserved() {
        assert_eq!(
            Severity::from("notice"),
            Severity::Other("notice".to_owned())
        );
        assert_eq!(Severity::from("warning"), Severity::Warning);
    }
}
