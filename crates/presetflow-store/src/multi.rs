//! Multi-seed preset store
//!
//! Reads fan out to every seed concurrently. A seed that fails is reported as
//! a warning and skipped; the listing only fails when every seed fails. When
//! two seeds hold a preset with the same name, the seed configured first
//! wins.
//!
//! Lookups and writes resolve a name the same way: the first seed holding it
//! owns it, and updates go to that seed. New presets go to the primary
//! (first) seed. A name that no readable seed holds is reported as the
//! unreadable seed's error rather than as missing.

use async_trait::async_trait;
use futures_util::future::join_all;
use presetflow_core::{
    ListingWarning, Preset, PresetStore, StoreError, StoreListing, StoreResult,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Seed name, seed store and the preset it holds
type Owner<'a> = (&'a str, &'a Arc<dyn PresetStore>, Preset);

/// Named seed stores read as a single store
#[derive(Clone, Default)]
pub struct MultiStore {
    seeds: Vec<(String, Arc<dyn PresetStore>)>,
}

impl MultiStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, name: impl Into<String>, store: Arc<dyn PresetStore>) -> Self {
        self.push_seed(name, store);
        self
    }

    pub fn push_seed(&mut self, name: impl Into<String>, store: Arc<dyn PresetStore>) {
        self.seeds.push((name.into(), store));
    }

    pub fn seed_names(&self) -> impl Iterator<Item = &str> {
        self.seeds.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    fn primary(&self) -> StoreResult<&Arc<dyn PresetStore>> {
        self.seeds
            .first()
            .map(|(_, store)| store)
            .ok_or_else(|| StoreError::Unavailable("no seeds configured".to_string()))
    }

    /// The seed owning `name` and its stored preset
    async fn locate(&self, name: &str) -> StoreResult<Option<Owner<'_>>> {
        let results = join_all(self.seeds.iter().map(|(_, store)| store.get(name))).await;

        let mut first_error = None;
        for ((seed, store), result) in self.seeds.iter().zip(results) {
            match result {
                Ok(Some(preset)) => return Ok(Some((seed.as_str(), store, preset))),
                Ok(None) => {}
                Err(error) => {
                    tracing::warn!(
                        seed = %seed,
                        preset = %name,
                        error = %error,
                        "seed lookup failed"
                    );
                    first_error.get_or_insert(error);
                }
            }
        }

        match first_error {
            Some(error) => Err(error),
            None => Ok(None),
        }
    }
}

impl fmt::Debug for MultiStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiStore")
            .field("seeds", &self.seed_names().collect::<Vec<_>>())
            .finish()
    }
}

#[async_trait]
impl PresetStore for MultiStore {
    fn name(&self) -> &str {
        "multi"
    }

    async fn list_all(&self) -> StoreResult<Vec<Preset>> {
        Ok(self.list().await?.presets)
    }

    /// List every seed, keeping partial results
    async fn list(&self) -> StoreResult<StoreListing> {
        let results = join_all(self.seeds.iter().map(|(_, store)| store.list_all())).await;

        let mut listing = StoreListing::default();
        let mut first_error = None;
        let mut succeeded = 0usize;
        let mut owners: HashMap<String, String> = HashMap::new();

        for ((seed, _), result) in self.seeds.iter().zip(results) {
            let presets = match result {
                Ok(presets) => presets,
                Err(error) => {
                    tracing::warn!(seed = %seed, error = %error, "skipping unavailable seed");
                    first_error.get_or_insert_with(|| error.clone());
                    listing.warnings.push(ListingWarning::Unavailable {
                        source: seed.clone(),
                        error,
                    });
                    continue;
                }
            };
            succeeded += 1;

            for preset in presets {
                let Some(winner) = owners.get(&preset.name).cloned() else {
                    owners.insert(preset.name.clone(), seed.clone());
                    listing.presets.push(preset);
                    continue;
                };

                if winner == *seed {
                    tracing::warn!(
                        preset = %preset.name,
                        seed = %seed,
                        "duplicate preset name within seed"
                    );
                    listing.warnings.push(ListingWarning::Duplicate {
                        preset: preset.name,
                        source: seed.clone(),
                    });
                    continue;
                }

                tracing::warn!(
                    preset = %preset.name,
                    seed = %seed,
                    winner = %winner,
                    "duplicate preset name across seeds"
                );
                listing.warnings.push(ListingWarning::Shadowed {
                    preset: preset.name,
                    source: seed.clone(),
                    winner,
                });
            }
        }

        if succeeded == 0
            && let Some(error) = first_error
        {
            return Err(error);
        }

        Ok(listing)
    }

    async fn get(&self, name: &str) -> StoreResult<Option<Preset>> {
        Ok(self.locate(name).await?.map(|(_, _, preset)| preset))
    }

    async fn create(&self, preset: Preset) -> StoreResult<Preset> {
        if let Some((seed, _, _)) = self.locate(&preset.name).await? {
            tracing::debug!(preset = %preset.name, seed = %seed, "name taken by seed");
            return Err(StoreError::AlreadyExists(preset.name));
        }
        self.primary()?.create(preset).await
    }

    async fn update(&self, preset: Preset) -> StoreResult<Preset> {
        match self.locate(&preset.name).await? {
            Some((seed, store, _)) => {
                tracing::debug!(preset = %preset.name, seed = %seed, "updating owning seed");
                store.update(preset).await
            }
            None => Err(StoreError::Missing(preset.name)),
        }
    }
}
