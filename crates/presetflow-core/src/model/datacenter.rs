//! データセンターモデル
//!
//! クレデンシャルのバインド時に参照するプロバイダーのデフォルト値のみを定義

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Datacenter {
    pub name: String,

    #[serde(default)]
    pub spec: DatacenterSpec,
}

impl Datacenter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatacenterSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openstack: Option<DatacenterSpecOpenstack>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vsphere: Option<DatacenterSpecVSphere>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct DatacenterSpecOpenstack {
    /// このデータセンターのクラスタにはフローティングIPが必須
    pub enforce_floating_ip: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct DatacenterSpecVSphere {
    pub default_storage_policy: String,
}
