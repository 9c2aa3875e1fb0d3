//! presetノードのパース

use super::{block_fields, node_name, string_args};
use crate::error::{PresetError, Result};
use crate::model::{Preset, ProviderKind};
use kdl::KdlNode;

/// `preset "name" { ... }` ノードをパース
pub fn parse_preset(node: &KdlNode) -> Result<Preset> {
    let mut preset = Preset::new(node_name(node, "preset")?);

    let Some(children) = node.children() else {
        return Ok(preset);
    };

    for child in children.nodes() {
        match child.name().value() {
            "required-emails" | "required_emails" | "requiredEmails" => {
                preset.spec.required_emails.extend(string_args(child));
            }
            "projects" => {
                preset.spec.projects.extend(string_args(child));
            }
            block => {
                let kind = provider_kind(block).ok_or_else(|| {
                    PresetError::InvalidConfig(format!(
                        "preset {}: unknown provider block {}",
                        preset.name, block
                    ))
                })?;

                if preset.spec.has_provider(kind) {
                    return Err(PresetError::InvalidConfig(format!(
                        "preset {}: {} credentials are declared more than once",
                        preset.name, kind
                    )));
                }

                let context = format!("preset {} {}", preset.name, block);
                let fields = block_fields(child, &context)?;
                preset
                    .spec
                    .set_bundle_from_value(kind, fields)
                    .map_err(|e| PresetError::InvalidConfig(format!("{}: {}", context, e)))?;
            }
        }
    }

    Ok(preset)
}

/// ブロック名に対応するプロバイダー
///
/// 区切り文字は無視する（`vmware-cloud-director` は VMwareCloudDirector）
fn provider_kind(block: &str) -> Option<ProviderKind> {
    ProviderKind::from_name(block).or_else(|| {
        let compact: String = block.chars().filter(|c| *c != '-' && *c != '_').collect();
        ProviderKind::from_name(&compact.to_lowercase())
    })
}
