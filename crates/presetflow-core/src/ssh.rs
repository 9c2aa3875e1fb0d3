//! プロバイダー・ディストリビューションごとのSSHログイン名

use crate::error::{PresetError, Result};
use crate::model::{OperatingSystem, ProviderKind};

/// ログイン名が未定義の組み合わせで返す値
pub const UNKNOWN_SSH_USER: &str = "unknown";

const SSH_USERS: &[(ProviderKind, OperatingSystem, &str)] = &[
    (ProviderKind::Digitalocean, OperatingSystem::Ubuntu, "root"),
    (ProviderKind::Digitalocean, OperatingSystem::ContainerLinux, "core"),
    (ProviderKind::Digitalocean, OperatingSystem::Flatcar, "core"),
    (ProviderKind::Hetzner, OperatingSystem::Ubuntu, "root"),
    (ProviderKind::Azure, OperatingSystem::Ubuntu, "ubuntu"),
    (ProviderKind::Azure, OperatingSystem::ContainerLinux, "core"),
    (ProviderKind::Azure, OperatingSystem::Flatcar, "core"),
    (ProviderKind::Azure, OperatingSystem::Rhel, "rhel"),
    (ProviderKind::VSphere, OperatingSystem::Ubuntu, "ubuntu"),
    (ProviderKind::VSphere, OperatingSystem::ContainerLinux, "core"),
    (ProviderKind::VSphere, OperatingSystem::Flatcar, "core"),
    (ProviderKind::VSphere, OperatingSystem::Rhel, "cloud-user"),
    (ProviderKind::Aws, OperatingSystem::Ubuntu, "ubuntu"),
    (ProviderKind::Aws, OperatingSystem::ContainerLinux, "core"),
    (ProviderKind::Aws, OperatingSystem::Flatcar, "core"),
    (ProviderKind::Aws, OperatingSystem::Rhel, "ec2-user"),
    (ProviderKind::Openstack, OperatingSystem::Rhel, "cloud-user"),
    (ProviderKind::Openstack, OperatingSystem::Ubuntu, "ubuntu"),
    (ProviderKind::Openstack, OperatingSystem::ContainerLinux, "core"),
    (ProviderKind::Openstack, OperatingSystem::Flatcar, "core"),
    (ProviderKind::Packet, OperatingSystem::Ubuntu, "root"),
    (ProviderKind::Packet, OperatingSystem::ContainerLinux, "core"),
    (ProviderKind::Packet, OperatingSystem::Flatcar, "core"),
    (ProviderKind::Gcp, OperatingSystem::Ubuntu, "ubuntu"),
    (ProviderKind::Gcp, OperatingSystem::Rhel, "cloud-user"),
    (ProviderKind::Gcp, OperatingSystem::ContainerLinux, "core"),
    (ProviderKind::Gcp, OperatingSystem::Flatcar, "core"),
    (ProviderKind::VMwareCloudDirector, OperatingSystem::Ubuntu, "ubuntu"),
    (ProviderKind::VMwareCloudDirector, OperatingSystem::ContainerLinux, "core"),
    (ProviderKind::VMwareCloudDirector, OperatingSystem::Flatcar, "core"),
    (ProviderKind::VMwareCloudDirector, OperatingSystem::Rhel, "cloud-user"),
];

/// `provider` 上で `distribution` を動かすマシンのログイン名
///
/// ディストリビューションの指定をプロバイダーより先にチェックする
pub fn ssh_user_name(
    distribution: Option<OperatingSystem>,
    provider: Option<ProviderKind>,
) -> Result<&'static str> {
    let distribution =
        distribution.ok_or_else(|| PresetError::invalid_argument("no operating system set"))?;
    let provider = provider.ok_or_else(|| PresetError::invalid_argument("no cloud provider set"))?;

    Ok(SSH_USERS
        .iter()
        .find(|(p, os, _)| *p == provider && *os == distribution)
        .map(|(_, _, user)| *user)
        .unwrap_or(UNKNOWN_SSH_USER))
}
