//! 階層化された設定
//!
//! 後のソースほど優先:
//! 1. 組み込みのデフォルト値
//! 2. `~/.config/presetflow/config.toml`
//! 3. `./presetflow.toml`
//! 4. `PRESETFLOW__*` 環境変数（例: `PRESETFLOW__EMAIL`）

use crate::error::Result;
use crate::{PROJECT_DIR, global_config_dir};
use config::{Config as Cfg, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const LOCAL_SETTINGS_FILE: &str = "presetflow.toml";
const ENV_PREFIX: &str = "PRESETFLOW";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// デフォルトのファイルストアのディレクトリ
    #[serde(default = "default_store_dir")]
    pub store_dir: PathBuf,

    /// コマンドラインで指定がない場合の呼び出し元メールアドレス
    #[serde(default)]
    pub email: Option<String>,

    /// コマンドラインで指定がない場合のプロジェクト
    #[serde(default)]
    pub project: Option<String>,

    /// シードストア（空なら `store_dir` の単一シード）
    #[serde(default)]
    pub seeds: Vec<SeedSettings>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSettings {
    pub name: String,
    pub store_dir: PathBuf,
}

fn default_store_dir() -> PathBuf {
    PathBuf::from(PROJECT_DIR)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            email: None,
            project: None,
            seeds: Vec::new(),
        }
    }
}

impl Settings {
    /// 標準の場所から読み込む
    pub fn load() -> Result<Self> {
        let global = global_config_dir().map(|dir| dir.join("config.toml"));
        Self::load_from(global.as_deref(), Path::new(LOCAL_SETTINGS_FILE))
    }

    /// 指定したファイルから読み込む（存在しないファイルはスキップ）
    pub fn load_from(global: Option<&Path>, local: &Path) -> Result<Self> {
        let mut builder = Cfg::builder();
        if let Some(global) = global {
            builder = builder.add_source(File::from(global).required(false));
        }

        let settings: Settings = builder
            .add_source(File::from(local).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;

        tracing::debug!(
            store_dir = %settings.store_dir.display(),
            seeds = settings.seeds.len(),
            "loaded settings"
        );
        Ok(settings)
    }

    /// 読み込むシード（優先順）
    pub fn seed_dirs(&self) -> Vec<SeedSettings> {
        if self.seeds.is_empty() {
            vec![SeedSettings {
                name: "default".to_string(),
                store_dir: self.store_dir.clone(),
            }]
        } else {
            self.seeds.clone()
        }
    }
}
