pub mod apply;
pub mod bind;
pub mod get;
pub mod list;
pub mod ssh_user;
pub mod validate;

use anyhow::Context as _;
use presetflow_core::{Manifest, parse_manifest_file};
use std::path::PathBuf;

/// `path` のマニフェスト、指定がなければ自動検出したもの
pub(crate) fn load_manifest(path: Option<PathBuf>) -> anyhow::Result<(PathBuf, Manifest)> {
    let path = match path {
        Some(path) => path,
        None => presetflow_config::find_presets_file()?,
    };
    let manifest = parse_manifest_file(&path)
        .with_context(|| format!("failed to load manifest {}", path.display()))?;
    Ok((path, manifest))
}
