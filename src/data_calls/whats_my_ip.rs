//! The `whats-my-ip` data call
//!
//! Returns the IP address of the requestor.
//!
//! Reference: <https://stat.ripe.net/docs/data_api#whats-my-ip>

use std::fmt;
use std::net::IpAddr;

use serde::Deserialize;

use crate::client::RipeStat;
use crate::error::Result;

pub(crate) const PATH: &str = "whats-my-ip";
pub(crate) const VERSION: &str = "0.1";

pub(crate) async fn fetch(client: &RipeStat) -> Result<WhatsMyIp> {
    let params = vec![("preferred_version", VERSION.to_owned())];

    let envelope = client.get(PATH, params).await?;
    Ok(serde_json::from_value(envelope.data)?)
}

/// Response of the whats-my-ip data call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WhatsMyIp {
    /// Public address of the requestor, IPv4 or IPv6
    pub ip: IpAddr,
}

impl fmt::Display for WhatsMyIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_ipv6_payload() {
        let data = json!({"ip": "f17d:36e:9d3b:4b39:b3c4:44a:b2b1:45e1"});

        let response: WhatsMyIp = serde_json::from_value(data).unwrap();
        assert!(response.ip.is_ipv6());
        assert_eq!(response.to_string(), "f17d:36e:9d3b:4b39:b3c4:44a:b2b1:45e1");
    }

    #[test]
    fn decodes_ipv4_payload() {
        let data = json!({"ip": "1.1.1.1"});

        let response: WhatsMyIp = serde_json::from_value(data).unwrap();
        assert_eq!(response.ip, "1.1.1.1".parse::<IpAddr>().unwrap());
    }
}
