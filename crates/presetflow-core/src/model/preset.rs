//! プリセットモデル
//!
//! プリセットは可視性の制約を持つ名前付きクレデンシャルです。
//! 各プロバイダーのブロックは任意で、通常は1つだけ持ちます。

use super::ProviderKind;
use serde::{Deserialize, Serialize};

/// アクセス範囲付きのクラウドクレデンシャル
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    /// 一意な名前（作成後は変更不可）
    pub name: String,

    /// ストアが採番するバージョン（更新ごとに増加、0 = 未保存）
    #[serde(default)]
    pub resource_version: u64,

    pub spec: PresetSpec,
}

impl Preset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_required_emails<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec.required_emails = emails.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_projects<I, S>(mut self, projects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec.projects = projects.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_spec(mut self, configure: impl FnOnce(&mut PresetSpec)) -> Self {
        configure(&mut self.spec);
        self
    }
}

/// 可視性の制約と、プロバイダーごとのクレデンシャル（任意）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PresetSpec {
    /// メールアドレスまたはドメイン（空なら全ユーザー）
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required_emails: Vec<String>,

    /// 利用可能なプロジェクトID（空なら全プロジェクト）
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fake: Option<FakeCredentials>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws: Option<AwsCredentials>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure: Option<AzureCredentials>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digitalocean: Option<DigitaloceanCredentials>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gcp: Option<GcpCredentials>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hetzner: Option<HetznerCredentials>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openstack: Option<OpenstackCredentials>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packet: Option<PacketCredentials>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vsphere: Option<VSphereCredentials>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alibaba: Option<AlibabaCredentials>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anexia: Option<AnexiaCredentials>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubevirt: Option<KubevirtCredentials>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutanix: Option<NutanixCredentials>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vmwareclouddirector: Option<VMwareCloudDirectorCredentials>,
}

impl PresetSpec {
    /// `kind` のクレデンシャルを持っているか
    pub fn has_provider(&self, kind: ProviderKind) -> bool {
        match kind {
            ProviderKind::Fake => self.fake.is_some(),
            ProviderKind::Aws => self.aws.is_some(),
            ProviderKind::Azure => self.azure.is_some(),
            ProviderKind::Digitalocean => self.digitalocean.is_some(),
            ProviderKind::Gcp => self.gcp.is_some(),
            ProviderKind::Hetzner => self.hetzner.is_some(),
            ProviderKind::Openstack => self.openstack.is_some(),
            ProviderKind::Packet => self.packet.is_some(),
            ProviderKind::VSphere => self.vsphere.is_some(),
            ProviderKind::Alibaba => self.alibaba.is_some(),
            ProviderKind::Anexia => self.anexia.is_some(),
            ProviderKind::Kubevirt => self.kubevirt.is_some(),
            ProviderKind::Nutanix => self.nutanix.is_some(),
            ProviderKind::VMwareCloudDirector => self.vmwareclouddirector.is_some(),
        }
    }

    /// クレデンシャルを持つプロバイダー（定義順）
    pub fn providers(&self) -> Vec<ProviderKind> {
        ProviderKind::ALL
            .into_iter()
            .filter(|kind| self.has_provider(*kind))
            .collect()
    }

    /// 汎用のフィールドマップからクレデンシャルを設定（マニフェストパーサー用）
    pub fn set_bundle_from_value(
        &mut self,
        kind: ProviderKind,
        fields: serde_json::Value,
    ) -> serde_json::Result<()> {
        match kind {
            ProviderKind::Fake => self.fake = Some(serde_json::from_value(fields)?),
            ProviderKind::Aws => self.aws = Some(serde_json::from_value(fields)?),
            ProviderKind::Azure => self.azure = Some(serde_json::from_value(fields)?),
            ProviderKind::Digitalocean => self.digitalocean = Some(serde_json::from_value(fields)?),
            ProviderKind::Gcp => self.gcp = Some(serde_json::from_value(fields)?),
            ProviderKind::Hetzner => self.hetzner = Some(serde_json::from_value(fields)?),
            ProviderKind::Openstack => self.openstack = Some(serde_json::from_value(fields)?),
            ProviderKind::Packet => self.packet = Some(serde_json::from_value(fields)?),
            ProviderKind::VSphere => self.vsphere = Some(serde_json::from_value(fields)?),
            ProviderKind::Alibaba => self.alibaba = Some(serde_json::from_value(fields)?),
            ProviderKind::Anexia => self.anexia = Some(serde_json::from_value(fields)?),
            ProviderKind::Kubevirt => self.kubevirt = Some(serde_json::from_value(fields)?),
            ProviderKind::Nutanix => self.nutanix = Some(serde_json::from_value(fields)?),
            ProviderKind::VMwareCloudDirector => {
                self.vmwareclouddirector = Some(serde_json::from_value(fields)?)
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct FakeCredentials {
    pub token: String,
}

impl FakeCredentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct AwsCredentials {
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
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct AzureCredentials {
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
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct DigitaloceanCredentials {
    pub token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct GcpCredentials {
    pub service_account: String,
    pub network: String,
    pub subnetwork: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct HetznerCredentials {
    pub token: String,
    pub network: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct OpenstackCredentials {
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
    /// 設定されていればデータセンターのフローティングIP設定より優先
    pub enforce_floating_ip: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct PacketCredentials {
    pub api_key: String,
    pub project_id: String,
    pub billing_cycle: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct VSphereCredentials {
    pub username: String,
    pub password: String,
    pub vm_net_name: String,
    pub datastore: String,
    pub datastore_cluster: String,
    pub resource_pool: String,
    pub storage_policy: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct AlibabaCredentials {
    pub access_key_id: String,
    pub access_key_secret: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct AnexiaCredentials {
    pub token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct KubevirtCredentials {
    pub kubeconfig: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct NutanixCredentials {
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
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct VMwareCloudDirectorCredentials {
    pub username: String,
    pub password: String,
    pub api_token: String,
    pub organization: String,
    pub vdc: String,
    pub ovdc_network: String,
}
