//! datacenterノードのパース

use super::{block_fields, node_name};
use crate::error::{PresetError, Result};
use crate::model::Datacenter;
use kdl::KdlNode;

/// `datacenter "name" { ... }` ノードをパース
pub fn parse_datacenter(node: &KdlNode) -> Result<Datacenter> {
    let mut datacenter = Datacenter::new(node_name(node, "datacenter")?);

    let Some(children) = node.children() else {
        return Ok(datacenter);
    };

    for child in children.nodes() {
        let block = child.name().value();
        let context = format!("datacenter {} {}", datacenter.name, block);
        let invalid = |e: serde_json::Error| PresetError::InvalidConfig(format!("{}: {}", context, e));

        match block {
            "openstack" => {
                let fields = block_fields(child, &context)?;
                datacenter.spec.openstack = Some(serde_json::from_value(fields).map_err(invalid)?);
            }
            "vsphere" | "VSphere" => {
                let fields = block_fields(child, &context)?;
                datacenter.spec.vsphere = Some(serde_json::from_value(fields).map_err(invalid)?);
            }
            other => {
                return Err(PresetError::InvalidConfig(format!(
                    "datacenter {}: unsupported block {}",
                    datacenter.name, other
                )));
            }
        }
    }

    Ok(datacenter)
}
