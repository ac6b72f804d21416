//! Query resource types
//!
//! RIPEstat data calls take a `resource` parameter that is an ASN, an IP
//! address or a prefix depending on the call. Calls that accept exactly one
//! kind take that type directly; calls that accept any of them (such as the
//! abuse contact finder) take a [`Resource`].

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use ipnet::IpNet;

use crate::error::Error;

/// A query resource: an ASN, a single IP address, or a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Autonomous System Number (32-bit)
    Asn(u32),
    /// Single IPv4 or IPv6 address
    Ip(IpAddr),
    /// IPv4 or IPv6 prefix
    Prefix(IpNet),
}

impl Resource {
    /// Build an ASN resource, rejecting values outside the 32-bit ASN space.
    pub fn asn(value: u64) -> Result<Self, Error> {
        u32::try_from(value)
            .map(Self::Asn)
            .map_err(|_| Error::InvalidAsn(value))
    }
}

impl fmt::Display for Resource {
    /// Formats the resource the way the query parameter expects it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asn(asn) => write!(f, "{asn}"),
            Self::Ip(ip) => write!(f, "{ip}"),
            Self::Prefix(net) => write!(f, "{net}"),
        }
    }
}

impl FromStr for Resource {
    type Err = Error;

    /// Parse an ASN (optionally `AS`-prefixed), an IP address, or a prefix.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();

        let asn_digits = trimmed
            .strip_prefix("AS")
            .or_else(|| trimmed.strip_prefix("as"))
            .unwrap_or(trimmed);
        if asn_digits.chars().all(|c| c.is_ascii_digit()) && !asn_digits.is_empty() {
            return match asn_digits.parse::<u64>() {
                Ok(value) => Self::asn(value),
                Err(_) => Err(Error::invalid_resource(raw)),
            };
        }

        if let Ok(ip) = trimmed.parse::<IpAddr>() {
            return Ok(Self::Ip(ip));
        }
        if let Ok(net) = trimmed.parse::<IpNet>() {
            return Ok(Self::Prefix(net));
        }

        Err(Error::invalid_resource(raw))
    }
}

impl From<u32> for Resource {
    fn from(asn: u32) -> Self {
        Self::Asn(asn)
    }
}

impl From<IpAddr> for Resource {
    fn from(ip: IpAddr) -> Self {
        Self::Ip(ip)
    }
}

impl From<Ipv4Addr> for Resource {
    fn from(ip: Ipv4Addr) -> Self {
        Self::Ip(IpAddr::V4(ip))
    }
}

impl From<Ipv6Addr> for Resource {
    fn from(ip: Ipv6Addr) -> Self {
        Self::Ip(IpAddr::V6(ip))
    }
}

impl From<IpNet> for Resource {
    fn from(net: IpNet) -> Self {
        Self::Prefix(net)
    }
}

/// Normalize a prefix to its network boundary (host bits zeroed).
///
/// The API rejects prefixes with host bits set, so inputs like
/// `193.0.10.1/21` are truncated before being sent.
pub(crate) fn normalize_prefix(net: IpNet) -> IpNet {
    net.trunc()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_asn_forms() {
        assert_eq!("3333".parse::<Resource>().unwrap(), Resource::Asn(3333));
        assert_eq!("AS3333".parse::<Resource>().unwrap(), Resource::Asn(3333));
        assert_eq!("as3333".parse::<Resource>().unwrap(), Resource::Asn(3333));
    }

    #[test]
    fn rejects_asn_above_32_bits() {
        let err = "4294967296".parse::<Resource>().unwrap_err();
        assert!(matches!(err, Error::InvalidAsn(4294967296)));
    }

    #[test]
    fn parses_addresses_and_prefixes() {
        assert_eq!(
            "193.0.0.1".parse::<Resource>().unwrap(),
            Resource::Ip("193.0.0.1".parse().unwrap())
        );
        assert_eq!(
            "193.0.0.0/21".parse::<Resource>().unwrap(),
            Resource::Prefix("193.0.0.0/21".parse().unwrap())
        );
        assert_eq!(
            "2001:db8::1".parse::<Resource>().unwrap(),
            Resource::Ip("2001:db8::1".parse().unwrap())
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!("invalid-prefix".parse::<Resource>().is_err());
        assert!("".parse::<Resource>().is_err());
    }

    #[test]
    fn display_matches_query_form() {
        assert_eq!(Resource::Asn(3333).to_string(), "3333");
        assert_eq!(
            Resource::Prefix("193.0.0.0/21".parse().unwrap()).to_string(),
            "193.0.0.0/21"
        );
    }

    #[test]
    fn prefix_normalization_zeroes_host_bits() {
        let net: IpNet = "193.0.10.1/21".parse().unwrap();
        assert_eq!(normalize_prefix(net).to_string(), "193.0.8.0/21");
    }
}
