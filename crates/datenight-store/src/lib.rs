//! Local persisted list of date plans.
//!
//! Plans live in a single JSON array stored under a fixed key in an opaque
//! key-value [`BlobStore`]. The [`PlanStore`] performs a load, mutate,
//! persist cycle for every operation; concurrent writers are not
//! coordinated and the last write wins.

pub mod blob;
pub mod config;
pub mod models;
pub mod render;
pub mod store;

pub use blob::{BlobError, BlobStore, FileBlobStore, MemoryBlobStore};
pub use config::StoreConfig;
pub use models::{PlanFields, PlanRecord, compare_plans};
pub use store::{PlanStore, StoreError};
