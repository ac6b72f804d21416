//! Typed async client for the RIPEstat Data API
//!
//! [RIPEstat](https://stat.ripe.net/docs/data_api) is RIPE NCC's public REST
//! service for Internet routing and measurement data. This crate wraps its
//! data calls behind a configured client with typed responses.
//!
//! # Example
//!
//! ```no_run
//! use ripestat_client::RipeStat;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ripe = RipeStat::builder().sourceapp("my-project").build()?;
//!
//! let status = ripe
//!     .rpki_validation_status(3333, "193.0.0.0/21".parse()?)
//!     .await?;
//! println!("{}", status.status);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod data_calls;
mod de;
pub mod error;
pub mod response;
pub mod types;

pub use client::{DataOverloadLimit, RipeStat, RipeStatBuilder, DEFAULT_BASE_URL};
pub use data_calls::{
    AbuseContacts, AddressSpaceHierarchy, AnnouncedPrefixes, AsnNeighbours, LevelOfDetail,
    LookingGlass, NetworkInfo, RisPeers, RoutingHistory, RpkiStatus, RpkiValidationStatus,
    WhatsMyIp,
};
pub use error::{Error, Result};
pub use response::{ApiResponse, Message, Severity};
pub use types::Resource;
