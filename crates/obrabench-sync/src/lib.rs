//! Data-source layer: PNCP open-data contract-item search.

#[cfg(feature = "http")]
pub mod pncp;

#[cfg(feature = "http")]
pub use pncp::{Category, PncpClient, SearchQuery, SyncError};
