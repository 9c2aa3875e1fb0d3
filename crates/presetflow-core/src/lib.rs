//! PresetFlow Core
//!
//! Kubernetesクラスタ作成用のクレデンシャルプリセット。
//! ユーザーが参照できるプリセットの判定と、選択したプリセットの
//! クレデンシャルをクラスタのクラウド設定へ反映する処理を提供します。
//!
//! # アーキテクチャ
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  preset CLI                      │
//! │            (list / get / bind / apply)           │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               presetflow-core                    │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │   PresetProvider (visibility + binding)   │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────────────┐    │
//! │  │  KDL Parser  │  │  trait PresetStore   │    │
//! │  └──────────────┘  └──────────────────────┘    │
//! └───────────────────────────┬─────────────────────┘
//!                             │
//!              ┌──────────────▼──────────────┐
//!              │      presetflow-store       │
//!              │  (file store, multi-seed)   │
//!              └─────────────────────────────┘
//! ```

pub mod binder;
pub mod error;
pub mod model;
pub mod parser;
pub mod resolver;
pub mod ssh;
pub mod store;
pub mod validation;
pub mod visibility;

// 再エクスポート
pub use binder::{DEFAULT_PACKET_BILLING_CYCLE, bind_credentials};
pub use error::{PresetError, Result};
pub use model::*;
pub use parser::{Manifest, parse_datacenter, parse_manifest, parse_manifest_file, parse_preset};
pub use resolver::PresetProvider;
pub use ssh::ssh_user_name;
pub use store::{
    ListingWarning, MemoryStore, PresetStore, StoreError, StoreListing, StoreResult,
};
pub use validation::validate_preset;
pub use visibility::{filter_visible, is_preset_visible};
