//! PresetFlow設定
//!
//! 設定ディレクトリとプリセットマニフェストの探索、
//! 階層化された [`Settings`] の読み込みを行います。

pub mod error;
pub mod settings;

pub use error::*;
pub use settings::{SeedSettings, Settings};

use std::path::PathBuf;

/// マニフェストを直接指定する環境変数
pub const PRESETS_PATH_ENV: &str = "PRESETFLOW_PRESETS_PATH";

/// マニフェストとデフォルトのファイルストアを置くプロジェクトディレクトリ
pub const PROJECT_DIR: &str = ".presetflow";

const MANIFEST_CANDIDATES: [&str; 4] = [
    "presets.local.kdl",
    ".presets.local.kdl",
    "presets.kdl",
    ".presets.kdl",
];

/// PresetFlowの設定ディレクトリ（`~/.config/presetflow`）を取得、なければ作成
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = global_config_dir().ok_or(ConfigError::ConfigDirNotFound)?;

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        tracing::debug!(dir = %config_dir.display(), "created config directory");
    }

    Ok(config_dir)
}

pub(crate) fn global_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("presetflow"))
}

/// プリセットマニフェストを探す
///
/// 以下の優先順位で検索:
/// 1. 環境変数 PRESETFLOW_PRESETS_PATH (直接パス指定)
/// 2. カレントディレクトリ: presets.local.kdl, .presets.local.kdl, presets.kdl, .presets.kdl
/// 3. ./.presetflow/ ディレクトリ内: 同様の順序
/// 4. ~/.config/presetflow/presets.kdl (グローバル設定)
pub fn find_presets_file() -> Result<PathBuf> {
    // 1. 環境変数で直接指定
    if let Ok(manifest_path) = std::env::var(PRESETS_PATH_ENV) {
        let path = PathBuf::from(manifest_path);
        if path.exists() {
            tracing::debug!(path = %path.display(), "using manifest from environment");
            return Ok(path);
        }
        tracing::warn!(path = %path.display(), "{} points at a missing file", PRESETS_PATH_ENV);
    }

    let current_dir = std::env::current_dir()?;

    // 2. カレントディレクトリで検索
    for filename in &MANIFEST_CANDIDATES {
        let path = current_dir.join(filename);
        if path.exists() {
            return Ok(path);
        }
    }

    // 3. ./.presetflow/ ディレクトリで検索
    let project_dir = current_dir.join(PROJECT_DIR);
    if project_dir.is_dir() {
        for filename in &MANIFEST_CANDIDATES {
            let path = project_dir.join(filename);
            if path.exists() {
                return Ok(path);
            }
        }
    }

    // 4. グローバル設定
    if let Some(config_dir) = global_config_dir() {
        let global_manifest = config_dir.join("presets.kdl");
        if global_manifest.exists() {
            return Ok(global_manifest);
        }
    }

    Err(ConfigError::PresetsFileNotFound)
}
