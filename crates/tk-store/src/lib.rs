//! Persistence for Tallykeep.
//!
//! Provides the key/value blob-store abstraction, the versioned schema
//! migration pipeline that upgrades persisted data across generations, and
//! the [`Session`] handle that owns the in-memory account aggregate and is
//! the single save point for every mutation.

/// Error types for store operations.
pub mod error;
/// Key/value blob-store abstraction and implementations.
pub mod kv;
/// Schema migration pipeline: legacy keys → V1 → V2.
pub mod migrate;
/// The session handle: per-character CRUD over the account aggregate.
pub mod session;

pub use error::{StoreError, StoreResult};
pub use kv::{FileStore, KvStore, MemoryStore};
pub use migrate::{
    LegacyBundle, PersistedShape, UNIFIED_KEY, V1Account, detect_shape, export_account,
    import_account, legacy_to_v1, load_account, save_account, v1_to_v2,
};
pub use session::Session;
