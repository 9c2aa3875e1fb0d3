//! コマンド共通のコンテキスト（設定・ストア・呼び出し元）

use crate::output::OutputFormat;
use anyhow::{Context as _, bail};
use presetflow_config::Settings;
use presetflow_core::{PresetProvider, PresetStore, UserInfo};
use presetflow_store::{FileStore, MultiStore};
use std::path::PathBuf;
use std::sync::Arc;

/// 全サブコマンド共通のフラグ
pub struct GlobalArgs {
    pub store: Option<PathBuf>,
    pub email: Option<String>,
    pub project: Option<String>,
    pub output: OutputFormat,
}

pub struct Context {
    pub provider: PresetProvider,
    pub email: Option<String>,
    pub project: Option<String>,
    pub output: OutputFormat,
}

impl Context {
    /// 設定にコマンドラインのフラグを重ねてストアを開く
    pub fn load(args: GlobalArgs) -> anyhow::Result<Self> {
        let settings = Settings::load().context("設定の読み込みに失敗しました")?;
        let store = open_store(args.store, &settings);

        Ok(Self {
            provider: PresetProvider::new(store),
            email: args.email.or(settings.email),
            project: args.project.or(settings.project),
            output: args.output,
        })
    }

    pub fn user(&self) -> anyhow::Result<UserInfo> {
        match self.email.as_deref() {
            Some(email) if !email.is_empty() => Ok(UserInfo::new(email)),
            _ => bail!("no email given: pass --email or set `email` in presetflow.toml"),
        }
    }

    /// プロジェクト（空文字はプロジェクトなし）
    pub fn project(&self) -> Option<&str> {
        self.project.as_deref().filter(|p| !p.is_empty())
    }
}

fn open_store(store_flag: Option<PathBuf>, settings: &Settings) -> Arc<dyn PresetStore> {
    if let Some(dir) = store_flag {
        tracing::debug!(dir = %dir.display(), "using store from command line");
        return Arc::new(FileStore::new(dir));
    }

    let seeds = settings.seed_dirs();
    if let [seed] = seeds.as_slice() {
        return Arc::new(FileStore::new(&seed.store_dir).with_name(&seed.name));
    }

    let mut multi = MultiStore::new();
    for seed in seeds {
        tracing::debug!(seed = %seed.name, dir = %seed.store_dir.display(), "adding seed");
        let store = FileStore::new(&seed.store_dir).with_name(&seed.name);
        multi.push_seed(seed.name, Arc::new(store));
    }
    Arc::new(multi)
}
