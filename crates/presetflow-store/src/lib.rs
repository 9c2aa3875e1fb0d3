//! PresetFlow Stores
//!
//! Durable implementations of [`presetflow_core::PresetStore`]:
//!
//! - [`FileStore`]: presets kept in `<dir>/presets.json`, with a backup of the
//!   previous file and a lock file guarding writes
//! - [`MultiStore`]: several named seed stores read as one

pub mod error;
pub mod file;
pub mod multi;

// Re-exports
pub use error::{FileStoreError, Result};
pub use file::{FileStore, PresetFile, StoreLock};
pub use multi::MultiStore;
