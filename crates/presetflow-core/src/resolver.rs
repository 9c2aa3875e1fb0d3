//! Preset resolution
//!
//! `PresetProvider` is the only reader of the preset store. Every lookup goes
//! through the visibility rules, so a preset hidden from the caller is
//! indistinguishable from one that does not exist.

use crate::binder::bind_credentials;
use crate::error::{PresetError, Result};
use crate::model::{CloudSpec, Datacenter, Preset, UserInfo};
use crate::store::{PresetStore, StoreListing};
use crate::validation::validate_preset;
use crate::visibility::{filter_visible, is_preset_visible};
use std::sync::Arc;

/// Visibility-aware access to presets
#[derive(Clone)]
pub struct PresetProvider {
    store: Arc<dyn PresetStore>,
}

impl PresetProvider {
    pub fn new(store: Arc<dyn PresetStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn PresetStore> {
        &self.store
    }

    /// Presets visible to `user` within `project_id`, in store order
    pub async fn get_presets(
        &self,
        user: &UserInfo,
        project_id: Option<&str>,
    ) -> Result<Vec<Preset>> {
        Ok(self.get_presets_with_warnings(user, project_id).await?.presets)
    }

    /// Like `get_presets`, keeping the store's warnings about skipped
    /// sources so callers can report a partial listing.
    pub async fn get_presets_with_warnings(
        &self,
        user: &UserInfo,
        project_id: Option<&str>,
    ) -> Result<StoreListing> {
        let listing = self.store.list().await?;
        let visible = filter_visible(listing.presets, &user.email, project_id);

        tracing::debug!(
            store = self.store.name(),
            email = %user.email,
            visible = visible.len(),
            warnings = listing.warnings.len(),
            "listed presets"
        );
        Ok(StoreListing {
            presets: visible,
            warnings: listing.warnings,
        })
    }

    /// The visible preset named `name`.
    ///
    /// When no match exists but part of the store could not be read, the
    /// store error is returned: the preset may live in the unreadable part.
    pub async fn get_preset(
        &self,
        user: &UserInfo,
        project_id: Option<&str>,
        name: &str,
    ) -> Result<Preset> {
        let listing = self.store.list().await?;
        let unavailable = listing.first_unavailable().cloned();

        match listing
            .presets
            .into_iter()
            .find(|p| p.name == name && is_preset_visible(p, &user.email, project_id))
        {
            Some(preset) => Ok(preset),
            None => match unavailable {
                Some(error) => Err(PresetError::Store(error)),
                None => Err(PresetError::NotFound(name.to_string())),
            },
        }
    }

    /// Resolve `preset_name` for the caller and bind its credentials onto
    /// `cloud`.
    pub async fn set_cloud_credentials(
        &self,
        user: &UserInfo,
        project_id: &str,
        preset_name: &str,
        cloud: CloudSpec,
        datacenter: Option<&Datacenter>,
    ) -> Result<CloudSpec> {
        let preset = self.get_preset(user, Some(project_id), preset_name).await?;
        bind_credentials(&preset, cloud, datacenter)
    }

    pub async fn create_preset(&self, preset: Preset) -> Result<Preset> {
        validate_preset(&preset)?;
        let created = self.store.create(preset).await?;
        tracing::info!(preset = %created.name, store = self.store.name(), "created preset");
        Ok(created)
    }

    pub async fn update_preset(&self, preset: Preset) -> Result<Preset> {
        validate_preset(&preset)?;
        let updated = self.store.update(preset).await?;
        tracing::info!(
            preset = %updated.name,
            version = updated.resource_version,
            store = self.store.name(),
            "updated preset"
        );
        Ok(updated)
    }
}

impl std::fmt::Debug for PresetProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresetProvider")
            .field("store", &self.store.name())
            .finish()
    }
}
