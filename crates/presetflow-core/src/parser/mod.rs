//! KDLパーサー
//!
//! マニフェストにはプリセットとデータセンターを定義します:
//!
//! ```kdl
//! preset "team-aws" {
//!     required-emails "example.com" "ops@acme.io"
//!     projects "proj-a"
//!     aws {
//!         access-key-id "AKIA..."
//!         secret-access-key "..."
//!     }
//! }
//!
//! datacenter "os-fra" {
//!     openstack { enforce-floating-ip #true }
//! }
//! ```
//!
//! プロバイダーブロック内のフィールドはcamelCaseのJSONフィールドに対応するため、
//! `access-key-id`、`access_key_id`、`accessKeyId` は同じフィールドになります。

mod datacenter;
mod preset;


pub use datacenter::parse_datacenter;
pub use preset::parse_preset;

use crate::error::{PresetError, Result};
use crate::model::{Datacenter, Preset};
use kdl::{KdlDocument, KdlNode, KdlValue};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// 1つのマニフェストで定義されたプリセットとデータセンター（ファイル内の順序）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub presets: Vec<Preset>,
    pub datacenters: Vec<Datacenter>,
}

impl Manifest {
    pub fn preset(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }

    pub fn datacenter(&self, name: &str) -> Option<&Datacenter> {
        self.datacenters.iter().find(|dc| dc.name == name)
    }
}

/// KDLファイルをパースしてManifestを生成
pub fn parse_manifest_file<P: AsRef<Path>>(path: P) -> Result<Manifest> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let manifest = parse_manifest(&content)?;

    tracing::debug!(
        path = %path.display(),
        presets = manifest.presets.len(),
        datacenters = manifest.datacenters.len(),
        "parsed preset manifest"
    );
    Ok(manifest)
}

/// KDL文字列をパース
pub fn parse_manifest(content: &str) -> Result<Manifest> {
    let doc: KdlDocument = content.parse()?;
    let mut manifest = Manifest::default();
    let mut preset_names = HashSet::new();
    let mut datacenter_names = HashSet::new();

    for node in doc.nodes() {
        match node.name().value() {
            "preset" => {
                let preset = parse_preset(node)?;
                if !preset_names.insert(preset.name.clone()) {
                    return Err(PresetError::InvalidConfig(format!(
                        "preset {} is declared more than once",
                        preset.name
                    )));
                }
                manifest.presets.push(preset);
            }
            "datacenter" => {
                let datacenter = parse_datacenter(node)?;
                if !datacenter_names.insert(datacenter.name.clone()) {
                    return Err(PresetError::InvalidConfig(format!(
                        "datacenter {} is declared more than once",
                        datacenter.name
                    )));
                }
                manifest.datacenters.push(datacenter);
            }
            other => {
                // 不明なノードはスキップ
                tracing::debug!(node = other, "skipping unknown manifest node");
            }
        }
    }

    Ok(manifest)
}

/// `node` の最初の文字列引数（必須）
fn node_name(node: &KdlNode, kind: &str) -> Result<String> {
    node.entries()
        .first()
        .and_then(|e| e.value().as_string())
        .map(|s| s.to_string())
        .ok_or_else(|| PresetError::InvalidConfig(format!("{} requires a name", kind)))
}

/// `node` のすべての文字列引数
fn string_args(node: &KdlNode) -> Vec<String> {
    node.entries()
        .iter()
        .filter_map(|e| e.value().as_string().map(|s| s.to_string()))
        .collect()
}

/// ブロックの子ノードをcamelCaseのフィールド名をキーとするJSONオブジェクトに変換
fn block_fields(block: &KdlNode, context: &str) -> Result<Value> {
    let mut fields = Map::new();

    if let Some(children) = block.children() {
        for child in children.nodes() {
            let key = camel_case(child.name().value());
            let value = match child.entries() {
                [entry] => kdl_to_json(entry.value()),
                [] => {
                    return Err(PresetError::InvalidConfig(format!(
                        "{}: {} requires a value",
                        context,
                        child.name().value()
                    )));
                }
                _ => {
                    return Err(PresetError::InvalidConfig(format!(
                        "{}: {} takes a single value",
                        context,
                        child.name().value()
                    )));
                }
            };

            if fields.insert(key, value).is_some() {
                return Err(PresetError::InvalidConfig(format!(
                    "{}: {} is set more than once",
                    context,
                    child.name().value()
                )));
            }
        }
    }

    Ok(Value::Object(fields))
}

fn kdl_to_json(value: &KdlValue) -> Value {
    if let Some(s) = value.as_string() {
        Value::from(s)
    } else if let Some(b) = value.as_bool() {
        Value::from(b)
    } else if let Some(i) = value.as_integer() {
        i64::try_from(i).map(Value::from).unwrap_or(Value::Null)
    } else if let Some(f) = value.as_float() {
        Value::from(f)
    } else {
        Value::Null
    }
}

/// `access-key-id` / `access_key_id` -> `accessKeyId`
fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;

    for c in name.chars() {
        if c == '-' || c == '_' {
            upper = !out.is_empty();
            continue;
        }
        if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }

    out
}
