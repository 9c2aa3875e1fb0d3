//! File-backed preset store
//!
//! Presets live in `<dir>/presets.json`. Every write keeps the previous file
//! as `presets.json.backup` and holds `lock.json` for its duration, so two
//! processes sharing a directory never interleave writes. A lock older than
//! one hour is considered abandoned.

use crate::error::{FileStoreError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use presetflow_core::store::{insert_preset, replace_preset};
use presetflow_core::{Preset, PresetStore, StoreResult};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

const STORE_VERSION: u32 = 1;
const STORE_FILE: &str = "presets.json";
const STORE_BACKUP: &str = "presets.json.backup";
const STORE_TMP: &str = "presets.json.tmp";
const LOCK_FILE: &str = "lock.json";
const LOCK_STALE_AFTER_HOURS: i64 = 1;

/// On-disk layout of `presets.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetFile {
    /// Store file version
    pub version: u32,

    /// Last modified timestamp
    pub updated_at: DateTime<Utc>,

    #[serde(default)]
    pub presets: Vec<Preset>,
}

impl Default for PresetFile {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            updated_at: Utc::now(),
            presets: Vec::new(),
        }
    }
}

impl PresetFile {
    pub fn new() -> Self {
        Self::default()
    }

    fn touch(&mut self) {
        self.version = STORE_VERSION;
        self.updated_at = Utc::now();
    }
}

/// Preset store persisted as JSON in a directory
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    name: String,
    /// Serializes writers within this process; `lock.json` covers the rest
    write_guard: Mutex<()>,
}

impl FileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            name: "file".to_string(),
            write_guard: Mutex::new(()),
        }
    }

    /// Name reported in diagnostics, e.g. the seed this store backs
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn store_path(&self) -> PathBuf {
        self.dir.join(STORE_FILE)
    }

    fn backup_path(&self) -> PathBuf {
        self.dir.join(STORE_BACKUP)
    }

    fn lock_path(&self) -> PathBuf {
        self.dir.join(LOCK_FILE)
    }

    async fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).await?;
            tracing::debug!(dir = %self.dir.display(), "created store directory");
        }
        Ok(())
    }

    /// Read the store file; a missing file is an empty store
    pub async fn load(&self) -> Result<PresetFile> {
        let path = self.store_path();
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "store file not found, using empty store");
                return Ok(PresetFile::new());
            }
            Err(e) => return Err(e.into()),
        };

        let file: PresetFile = serde_json::from_str(&content)?;
        if file.version > STORE_VERSION {
            return Err(FileStoreError::Format(format!(
                "store file version {} is newer than supported version {}",
                file.version, STORE_VERSION
            )));
        }

        tracing::debug!(path = %path.display(), presets = file.presets.len(), "loaded store");
        Ok(file)
    }

    /// Write the store file, keeping the previous one as a backup
    pub async fn save(&self, file: &PresetFile) -> Result<()> {
        self.ensure_dir().await?;

        let path = self.store_path();
        if path.exists() {
            fs::copy(&path, self.backup_path()).await?;
            tracing::debug!("created store backup");
        }

        let tmp = self.dir.join(STORE_TMP);
        fs::write(&tmp, serde_json::to_string_pretty(file)?).await?;
        fs::rename(&tmp, &path).await?;

        tracing::debug!(path = %path.display(), presets = file.presets.len(), "saved store");
        Ok(())
    }

    /// Take `lock.json`, replacing it if it has gone stale
    pub async fn acquire_lock(&self) -> Result<StoreLock> {
        self.ensure_dir().await?;
        let lock_path = self.lock_path();

        if let Some(held) = read_lock(&lock_path).await? {
            if !held.is_stale() {
                return Err(FileStoreError::Lock(format!(
                    "store is locked by {} since {}",
                    held.holder, held.acquired_at
                )));
            }

            tracing::warn!(holder = %held.holder, "removing stale store lock");
            match fs::remove_file(&lock_path).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        let info = LockInfo::current();
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock_path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(FileStoreError::Lock(
                    "store was locked by another process".to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        };
        file.write_all(serde_json::to_string_pretty(&info)?.as_bytes())
            .await?;
        file.flush().await?;

        tracing::debug!(holder = %info.holder, "acquired store lock");
        Ok(StoreLock {
            lock_path,
            released: false,
        })
    }

    /// Load, modify and save under the store lock
    async fn write_with<F>(&self, apply: F) -> Result<Preset>
    where
        F: FnOnce(&mut Vec<Preset>) -> StoreResult<Preset>,
    {
        let _guard = self.write_guard.lock().await;
        let lock = self.acquire_lock().await?;

        let result: Result<Preset> = async {
            let mut file = self.load().await?;
            let preset = apply(&mut file.presets)?;
            file.touch();
            self.save(&file).await?;
            Ok(preset)
        }
        .await;

        lock.release().await?;
        result
    }
}

#[async_trait]
impl PresetStore for FileStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn list_all(&self) -> StoreResult<Vec<Preset>> {
        Ok(self.load().await?.presets)
    }

    async fn get(&self, name: &str) -> StoreResult<Option<Preset>> {
        Ok(self
            .load()
            .await?
            .presets
            .into_iter()
            .find(|p| p.name == name))
    }

    async fn create(&self, preset: Preset) -> StoreResult<Preset> {
        Ok(self
            .write_with(|presets| insert_preset(presets, preset))
            .await?)
    }

    async fn update(&self, preset: Preset) -> StoreResult<Preset> {
        Ok(self
            .write_with(|presets| replace_preset(presets, preset))
            .await?)
    }
}

async fn read_lock(path: &Path) -> Result<Option<LockInfo>> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Contents of `lock.json`
#[derive(Debug, Serialize, Deserialize)]
struct LockInfo {
    holder: String,
    acquired_at: DateTime<Utc>,
}

impl LockInfo {
    fn current() -> Self {
        Self {
            holder: std::env::var("HOSTNAME")
                .or_else(|_| std::env::var("HOST"))
                .unwrap_or_else(|_| "unknown".to_string()),
            acquired_at: Utc::now(),
        }
    }

    fn is_stale(&self) -> bool {
        Utc::now()
            .signed_duration_since(self.acquired_at)
            .num_hours()
            >= LOCK_STALE_AFTER_HOURS
    }
}

/// Guard for `lock.json`; the lock is removed on release or drop
#[derive(Debug)]
pub struct StoreLock {
    lock_path: PathBuf,
    released: bool,
}

impl StoreLock {
    pub async fn release(mut self) -> Result<()> {
        if !self.released {
            match fs::remove_file(&self.lock_path).await {
                Ok(()) => tracing::debug!("released store lock"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
            self.released = true;
        }
        Ok(())
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if !self.released {
            let _ = std::fs::remove_file(&self.lock_path);
        }
    }
}
