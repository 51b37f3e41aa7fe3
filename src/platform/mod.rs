//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (monotonic milliseconds for the simulation)
//! - Run seeds
//! - Storage (LocalStorage on web, a data directory natively)

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::sync::OnceLock;
    use std::time::{Instant, SystemTime, UNIX_EPOCH};

    use crate::persistence::{FileStore, StoreError};

    /// Environment variable overriding the save directory
    pub const DATA_DIR_ENV: &str = "SWORD_REFLEX_DATA_DIR";
    const DEFAULT_DATA_DIR: &str = ".sword-reflex";

    static START: OnceLock<Instant> = OnceLock::new();

    /// Milliseconds since the first call
    pub fn now_ms() -> u64 {
        START.get_or_init(Instant::now).elapsed().as_millis() as u64
    }

    pub fn seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    pub fn data_dir() -> PathBuf {
        std::env::var(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR))
    }

    pub fn open_store() -> Result<FileStore, StoreError> {
        FileStore::open(data_dir())
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use crate::persistence::{LocalStorage, StoreError};

    /// `performance.now()` in whole milliseconds
    pub fn now_ms() -> u64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now() as u64)
            .unwrap_or_else(|| js_sys::Date::now() as u64)
    }

    pub fn seed() -> u64 {
        js_sys::Date::now() as u64
    }

    pub fn open_store() -> Result<LocalStorage, StoreError> {
        LocalStorage::open()
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::*;
#[cfg(target_arch = "wasm32")]
pub use web::*;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_clock_is_monotonic() {
        let a = now_ms();
        let b = now_ms();
        assert!(b >= a);
    }
}
