//! クラスタのクラウド設定
//!
//! クラスタは1つのプロバイダー上で動作します。`CloudSpec::provider` が
//! そのプロバイダーの設定を持ち、`None` はプロバイダー未選択を表します。

use super::ProviderKind;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub datacenter_name: String,

    /// 不明なプロバイダーキーは `None` としてデシリアライズ
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_provider"
    )]
    pub provider: Option<ProviderSpec>,
}

impl CloudSpec {
    pub fn new(provider: ProviderSpec) -> Self {
        Self {
            datacenter_name: String::new(),
            provider: Some(provider),
        }
    }

    /// 指定プロバイダーの空の設定（不明な名前ならプロバイダーなし）
    pub fn for_provider_name(name: &str) -> Self {
        Self {
            datacenter_name: String::new(),
            provider: ProviderKind::from_name(name).map(ProviderSpec::empty),
        }
    }

    pub fn with_datacenter(mut self, name: impl Into<String>) -> Self {
        self.datacenter_name = name.into();
        self
    }

    pub fn kind(&self) -> Option<ProviderKind> {
        self.provider.as_ref().map(ProviderSpec::kind)
    }
}

/// プロバイダー固有のクラスタ設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderSpec {
    Fake(FakeCloudSpec),
    Aws(AwsCloudSpec),
    Azure(AzureCloudSpec),
    Digitalocean(DigitaloceanCloudSpec),
    Gcp(GcpCloudSpec),
    Hetzner(HetznerCloudSpec),
    Openstack(OpenstackCloudSpec),
    Packet(PacketCloudSpec),
    VSphere(VSphereCloudSpec),
    Alibaba(AlibabaCloudSpec),
    Anexia(AnexiaCloudSpec),
    Kubevirt(KubevirtCloudSpec),
    Nutanix(NutanixCloudSpec),
    VMwareCloudDirector(VMwareCloudDirectorCloudSpec),
}

impl ProviderSpec {
    pub fn kind(&self) -> ProviderKind {
        match self {
            ProviderSpec::Fake(_) => ProviderKind::Fake,
            ProviderSpec::Aws(_) => ProviderKind::Aws,
            ProviderSpec::Azure(_) => ProviderKind::Azure,
            ProviderSpec::Digitalocean(_) => ProviderKind::Digitalocean,
            ProviderSpec::Gcp(_) => ProviderKind::Gcp,
            ProviderSpec::Hetzner(_) => ProviderKind::Hetzner,
            ProviderSpec::Openstack(_) => ProviderKind::Openstack,
            ProviderSpec::Packet(_) => ProviderKind::Packet,
            ProviderSpec::VSphere(_) => ProviderKind::VSphere,
            ProviderSpec::Alibaba(_) => ProviderKind::Alibaba,
            ProviderSpec::Anexia(_) => ProviderKind::Anexia,
            ProviderSpec::Kubevirt(_) => ProviderKind::Kubevirt,
            ProviderSpec::Nutanix(_) => ProviderKind::Nutanix,
            ProviderSpec::VMwareCloudDirector(_) => ProviderKind::VMwareCloudDirector,
        }
    }

    /// 全フィールド未設定のプロバイダー設定
    pub fn empty(kind: ProviderKind) -> Self {
        match kind {
            ProviderKind::Fake => ProviderSpec::Fake(Default::default()),
            ProviderKind::Aws => ProviderSpec::Aws(Default::default()),
            ProviderKind::Azure => ProviderSpec::Azure(Default::default()),
            ProviderKind::Digitalocean => ProviderSpec::Digitalocean(Default::default()),
            ProviderKind::Gcp => ProviderSpec::Gcp(Default::default()),
            ProviderKind::Hetzner => ProviderSpec::Hetzner(Default::default()),
            ProviderKind::Openstack => ProviderSpec::Openstack(Default::default()),
            ProviderKind::Packet => ProviderSpec::Packet(Default::default()),
            ProviderKind::VSphere => ProviderSpec::VSphere(Default::default()),
            ProviderKind::Alibaba => ProviderSpec::Alibaba(Default::default()),
            ProviderKind::Anexia => ProviderSpec::Anexia(Default::default()),
            ProviderKind::Kubevirt => ProviderSpec::Kubevirt(Default::default()),
            ProviderKind::Nutanix => ProviderSpec::Nutanix(Default::default()),
            ProviderKind::VMwareCloudDirector => {
                ProviderSpec::VMwareCloudDirector(Default::default())
            }
        }
    }
}

fn deserialize_provider<'de, D>(deserializer: D) -> Result<Option<ProviderSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Map<String, serde_json::Value>>::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };

    let mut known = raw
        .into_iter()
        .filter(|(key, _)| ProviderKind::from_name(key).is_some());

    let Some((key, value)) = known.next() else {
        return Ok(None);
    };
    if known.next().is_some() {
        return Err(D::Error::custom("cloud spec must select exactly one provider"));
    }

    let kind = ProviderKind::from_name(&key)
        .ok_or_else(|| D::Error::custom(format!("unknown provider: {}", key)))?;
    let mut tagged = serde_json::Map::new();
    tagged.insert(kind.key().to_string(), value);
    serde_json::from_value(serde_json::Value::Object(tagged))
        .map(Some)
        .map_err(D::Error::custom)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FakeCloudSpec {
    pub token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AwsCloudSpec {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub assume_role_arn: String,
    pub assume_role_external_id: String,
    pub vpc_id: String,
    pub route_table_id: String,
    pub instance_profile_name: String,
    pub security_group_id: String,
    pub control_plane_role_arn: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AzureCloudSpec {
    pub subscription_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub tenant_id: String,
    pub resource_group: String,
    pub vnet_resource_group: String,
    pub vnet_name: String,
    pub subnet_name: String,
    pub route_table_name: String,
    pub security_group: String,
    pub load_balancer_sku: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DigitaloceanCloudSpec {
    pub token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GcpCloudSpec {
    pub service_account: String,
    pub network: String,
    pub subnetwork: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HetznerCloudSpec {
    pub token: String,
    pub network: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpenstackCloudSpec {
    pub username: String,
    pub password: String,
    pub project: String,
    pub project_id: String,
    pub domain: String,
    pub application_credential_id: String,
    pub application_credential_secret: String,
    pub use_token: bool,
    pub network: String,
    pub security_groups: String,
    pub floating_ip_pool: String,
    pub router_id: String,
    pub subnet_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enforce_floating_ip: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PacketCloudSpec {
    pub api_key: String,
    pub project_id: String,
    pub billing_cycle: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VSphereCloudSpec {
    pub username: String,
    pub password: String,
    pub vm_net_name: String,
    pub datastore: String,
    pub datastore_cluster: String,
    pub resource_pool: String,
    pub storage_policy: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlibabaCloudSpec {
    pub access_key_id: String,
    pub access_key_secret: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnexiaCloudSpec {
    pub token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KubevirtCloudSpec {
    pub kubeconfig: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NutanixCloudSpec {
    pub username: String,
    pub password: String,
    pub proxy_url: String,
    pub cluster_name: String,
    pub project_name: String,
    pub csi_username: String,
    pub csi_password: String,
    pub csi_endpoint: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VMwareCloudDirectorCloudSpec {
    pub username: String,
    pub password: String,
    pub api_token: String,
    pub organization: String,
    pub vdc: String,
    pub ovdc_network: String,
}
