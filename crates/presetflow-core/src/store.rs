//! Preset store abstraction
//!
//! The store owns persisted presets. Resolution reads through `list_all`;
//! `create` and `update` serve administrative writes.

use crate::model::Preset;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors raised by a preset store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("preset \"{0}\" already exists")]
    AlreadyExists(String),

    #[error("preset \"{0}\" does not exist in the store")]
    Missing(String),

    #[error(
        "preset \"{name}\" has been modified: expected resource version {expected}, found {found}"
    )]
    Conflict {
        name: String,
        expected: u64,
        found: u64,
    },

    #[error("preset store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A degraded condition observed while listing a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingWarning {
    /// A backing source could not be read and was skipped
    Unavailable { source: String, error: StoreError },

    /// A preset was hidden by one with the same name in an earlier source
    Shadowed {
        preset: String,
        source: String,
        winner: String,
    },

    /// A source holds the same name more than once; the first entry is kept
    Duplicate { preset: String, source: String },
}

impl fmt::Display for ListingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingWarning::Unavailable { source, error } => {
                write!(f, "seed {} skipped: {}", source, error)
            }
            ListingWarning::Shadowed {
                preset,
                source,
                winner,
            } => write!(
                f,
                "preset {} in seed {} is shadowed by seed {}",
                preset, source, winner
            ),
            ListingWarning::Duplicate { preset, source } => write!(
                f,
                "preset {} is stored more than once in seed {}; keeping the first",
                preset, source
            ),
        }
    }
}

/// Presets of a store together with what went wrong while reading them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreListing {
    pub presets: Vec<Preset>,
    pub warnings: Vec<ListingWarning>,
}

impl StoreListing {
    pub fn new(presets: Vec<Preset>) -> Self {
        Self {
            presets,
            warnings: Vec::new(),
        }
    }

    /// The error of the first source that could not be read
    pub fn first_unavailable(&self) -> Option<&StoreError> {
        self.warnings.iter().find_map(|warning| match warning {
            ListingWarning::Unavailable { error, .. } => Some(error),
            _ => None,
        })
    }
}

/// Durable preset storage
///
/// Implementations return presets in a stable order so that listings are
/// deterministic.
#[async_trait]
pub trait PresetStore: Send + Sync {
    /// Store name for diagnostics (e.g. "memory", "file", a seed name)
    fn name(&self) -> &str;

    /// Every stored preset, regardless of visibility
    async fn list_all(&self) -> StoreResult<Vec<Preset>>;

    /// Like `list_all`, also reporting sources that were skipped.
    ///
    /// Single-source stores have nothing to report.
    async fn list(&self) -> StoreResult<StoreListing> {
        Ok(StoreListing::new(self.list_all().await?))
    }

    async fn get(&self, name: &str) -> StoreResult<Option<Preset>>;

    async fn create(&self, preset: Preset) -> StoreResult<Preset>;

    async fn update(&self, preset: Preset) -> StoreResult<Preset>;
}

/// Append `preset` to `presets`, enforcing name uniqueness.
///
/// Shared write semantics for store implementations.
pub fn insert_preset(presets: &mut Vec<Preset>, mut preset: Preset) -> StoreResult<Preset> {
    if presets.iter().any(|p| p.name == preset.name) {
        return Err(StoreError::AlreadyExists(preset.name));
    }

    preset.resource_version = 1;
    presets.push(preset.clone());
    Ok(preset)
}

/// Replace the stored preset with the same name.
///
/// A non-zero `resource_version` on the incoming preset must match the stored
/// one.
pub fn replace_preset(presets: &mut [Preset], mut preset: Preset) -> StoreResult<Preset> {
    let stored = presets
        .iter_mut()
        .find(|p| p.name == preset.name)
        .ok_or_else(|| StoreError::Missing(preset.name.clone()))?;

    if preset.resource_version != 0 && preset.resource_version != stored.resource_version {
        return Err(StoreError::Conflict {
            name: preset.name,
            expected: preset.resource_version,
            found: stored.resource_version,
        });
    }

    preset.resource_version = stored.resource_version + 1;
    *stored = preset.clone();
    Ok(preset)
}

/// In-memory store preserving insertion order
#[derive(Debug, Default)]
pub struct MemoryStore {
    presets: RwLock<Vec<Preset>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing presets, kept as given
    pub fn with_presets(presets: impl IntoIterator<Item = Preset>) -> Self {
        Self {
            presets: RwLock::new(presets.into_iter().collect()),
        }
    }
}

#[async_trait]
impl PresetStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn list_all(&self) -> StoreResult<Vec<Preset>> {
        Ok(self.presets.read().await.clone())
    }

    async fn get(&self, name: &str) -> StoreResult<Option<Preset>> {
        Ok(self
            .presets
            .read()
            .await
            .iter()
            .find(|p| p.name == name)
            .cloned())
    }

    async fn create(&self, preset: Preset) -> StoreResult<Preset> {
        insert_preset(&mut *self.presets.write().await, preset)
    }

    async fn update(&self, preset: Preset) -> StoreResult<Preset> {
        replace_preset(&mut self.presets.write().await, preset)
    }
}
