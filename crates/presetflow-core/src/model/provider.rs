//! クラウドプロバイダーとOSの識別子

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 対応クラウドプロバイダー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Fake,
    Aws,
    Azure,
    Digitalocean,
    Gcp,
    Hetzner,
    Openstack,
    Packet,
    VSphere,
    Alibaba,
    Anexia,
    Kubevirt,
    Nutanix,
    VMwareCloudDirector,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 14] = [
        ProviderKind::Fake,
        ProviderKind::Aws,
        ProviderKind::Azure,
        ProviderKind::Digitalocean,
        ProviderKind::Gcp,
        ProviderKind::Hetzner,
        ProviderKind::Openstack,
        ProviderKind::Packet,
        ProviderKind::VSphere,
        ProviderKind::Alibaba,
        ProviderKind::Anexia,
        ProviderKind::Kubevirt,
        ProviderKind::Nutanix,
        ProviderKind::VMwareCloudDirector,
    ];

    /// エラーメッセージで使う正式名（"AWS", "VSphere" など）
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::Fake => "Fake",
            ProviderKind::Aws => "AWS",
            ProviderKind::Azure => "Azure",
            ProviderKind::Digitalocean => "Digitalocean",
            ProviderKind::Gcp => "GCP",
            ProviderKind::Hetzner => "Hetzner",
            ProviderKind::Openstack => "Openstack",
            ProviderKind::Packet => "Packet",
            ProviderKind::VSphere => "VSphere",
            ProviderKind::Alibaba => "Alibaba",
            ProviderKind::Anexia => "Anexia",
            ProviderKind::Kubevirt => "Kubevirt",
            ProviderKind::Nutanix => "Nutanix",
            ProviderKind::VMwareCloudDirector => "VMwareCloudDirector",
        }
    }

    /// マニフェストやシリアライズで使う小文字キー（"aws", "vsphere" など）
    pub fn key(&self) -> &'static str {
        match self {
            ProviderKind::Fake => "fake",
            ProviderKind::Aws => "aws",
            ProviderKind::Azure => "azure",
            ProviderKind::Digitalocean => "digitalocean",
            ProviderKind::Gcp => "gcp",
            ProviderKind::Hetzner => "hetzner",
            ProviderKind::Openstack => "openstack",
            ProviderKind::Packet => "packet",
            ProviderKind::VSphere => "vsphere",
            ProviderKind::Alibaba => "alibaba",
            ProviderKind::Anexia => "anexia",
            ProviderKind::Kubevirt => "kubevirt",
            ProviderKind::Nutanix => "nutanix",
            ProviderKind::VMwareCloudDirector => "vmwareclouddirector",
        }
    }

    /// 正式名またはキーからプロバイダーを取得
    ///
    /// 大文字小文字は区別する（"AWS" と "aws" は可、"Aws" は不可）
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name || kind.key() == name)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown provider: {}", s))
    }
}

/// SSHログイン名テーブルが扱うOSディストリビューション
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingSystem {
    Ubuntu,
    ContainerLinux,
    Flatcar,
    Rhel,
}

impl OperatingSystem {
    pub const ALL: [OperatingSystem; 4] = [
        OperatingSystem::Ubuntu,
        OperatingSystem::ContainerLinux,
        OperatingSystem::Flatcar,
        OperatingSystem::Rhel,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OperatingSystem::Ubuntu => "Ubuntu",
            OperatingSystem::ContainerLinux => "ContainerLinux",
            OperatingSystem::Flatcar => "Flatcar",
            OperatingSystem::Rhel => "RHEL",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            OperatingSystem::Ubuntu => "ubuntu",
            OperatingSystem::ContainerLinux => "containerlinux",
            OperatingSystem::Flatcar => "flatcar",
            OperatingSystem::Rhel => "rhel",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|os| os.name() == name || os.key() == name)
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OperatingSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown operating system: {}", s))
    }
}
