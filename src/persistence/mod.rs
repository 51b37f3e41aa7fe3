//! Save/load persistence
//!
//! Features:
//! - Pluggable string key-value stores (memory, file, LocalStorage)
//! - Typed JSON gateway with default-on-corruption loads
//! - Versioned profile envelope with legacy layout migration

pub mod gateway;
pub mod profile;
pub mod store;

pub use gateway::Gateway;
pub use profile::Profile;
#[cfg(not(target_arch = "wasm32"))]
pub use store::FileStore;
#[cfg(target_arch = "wasm32")]
pub use store::LocalStorage;
pub use store::{KeyValueStore, MemoryStore, StoreError};
