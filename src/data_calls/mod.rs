//! Typed wrappers for the RIPEstat data calls
//!
//! One module per call. Each pins the call's preferred API version, validates
//! and encodes the query parameters, and decodes the envelope `data` payload
//! into typed structs. Calls with optional parameters expose a request
//! builder; the rest are plain async methods on
//! [`RipeStat`](crate::client::RipeStat).

pub mod abuse_contact_finder;
pub mod address_space_hierarchy;
pub mod announced_prefixes;
pub mod asn_neighbours;
pub mod looking_glass;
pub mod network_info;
pub mod ris_peers;
pub mod routing_history;
pub mod rpki_validation_status;
pub mod whats_my_ip;

pub use abuse_contact_finder::{
    AbuseContact, AbuseContacts, AntiAbuseContacts, GlobalNetworkInfo, HolderInfo,
};
pub use address_space_hierarchy::{AddressSpaceHierarchy, Inetnum};
pub use announced_prefixes::{AnnouncedPrefix, AnnouncedPrefixes, AnnouncedPrefixesRequest, Timeline};
pub use asn_neighbours::{
    AsnNeighbours, AsnNeighboursRequest, LevelOfDetail, Neighbour, NeighbourCounts,
    NeighbourDetails, NeighbourPath, PathLocation, PathLocations, PeerCount, Position,
};
pub use looking_glass::{Collector, LookingGlass, Peer};
pub use network_info::NetworkInfo;
pub use ris_peers::{RisPeer, RisPeers, RisPeersRequest};
pub use routing_history::{OriginHistory, PrefixHistory, RoutingHistory, RoutingHistoryRequest};
pub use rpki_validation_status::{Roa, RpkiStatus, RpkiValidationStatus};
pub use whats_my_ip::WhatsMyIp;

/// Query-parameter timestamp format (naive ISO 8601, as the API expects).
pub(crate) fn format_time(time: chrono::NaiveDateTime) -> String {
    time.format("%Y-%m-%dT%H:%M:%S").to_string()
}
