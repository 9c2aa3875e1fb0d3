//! クレデンシャルのバインド
//!
//! プリセットのクレデンシャルを、クラスタのクラウド設定で選択された
//! プロバイダーへコピーします。プリセット側の空フィールドが既存の値を
//! 消すことはありません。データセンターやプロバイダーのデフォルト値は、
//! コピー後も未設定のフィールドにのみ適用されます。

use crate::error::{PresetError, Result};
use crate::model::*;

/// 未指定のPacketクラスタに適用する課金サイクル
pub const DEFAULT_PACKET_BILLING_CYCLE: &str = "hourly";

/// `preset` を `cloud` にバインドし、更新後の設定を返す
///
/// `cloud` にプロバイダーがない場合、またはプリセットにそのプロバイダーの
/// クレデンシャルがない場合はエラー（部分的な設定は返さない）
pub fn bind_credentials(
    preset: &Preset,
    mut cloud: CloudSpec,
    datacenter: Option<&Datacenter>,
) -> Result<CloudSpec> {
    let provider = cloud.provider.as_mut().ok_or_else(|| {
        PresetError::invalid_argument("can not find provider to set credentials")
    })?;

    let kind = provider.kind();
    let spec = &preset.spec;
    let missing = || {
        PresetError::InvalidArgument(format!(
            "the preset {} doesn't contain credential for {} provider",
            preset.name, kind
        ))
    };

    match provider {
        ProviderSpec::Fake(target) => bind_fake(target, spec.fake.as_ref().ok_or_else(missing)?),
        ProviderSpec::Aws(target) => bind_aws(target, spec.aws.as_ref().ok_or_else(missing)?),
        ProviderSpec::Azure(target) => {
            bind_azure(target, spec.azure.as_ref().ok_or_else(missing)?)
        }
        ProviderSpec::Digitalocean(target) => {
            bind_digitalocean(target, spec.digitalocean.as_ref().ok_or_else(missing)?)
        }
        ProviderSpec::Gcp(target) => bind_gcp(target, spec.gcp.as_ref().ok_or_else(missing)?),
        ProviderSpec::Hetzner(target) => {
            bind_hetzner(target, spec.hetzner.as_ref().ok_or_else(missing)?)
        }
        ProviderSpec::Openstack(target) => bind_openstack(
            target,
            spec.openstack.as_ref().ok_or_else(missing)?,
            datacenter.and_then(|dc| dc.spec.openstack.as_ref()),
        ),
        ProviderSpec::Packet(target) => {
            bind_packet(target, spec.packet.as_ref().ok_or_else(missing)?)
        }
        ProviderSpec::VSphere(target) => bind_vsphere(
            target,
            spec.vsphere.as_ref().ok_or_else(missing)?,
            datacenter.and_then(|dc| dc.spec.vsphere.as_ref()),
        ),
        ProviderSpec::Alibaba(target) => {
            bind_alibaba(target, spec.alibaba.as_ref().ok_or_else(missing)?)
        }
        ProviderSpec::Anexia(target) => {
            bind_anexia(target, spec.anexia.as_ref().ok_or_else(missing)?)
        }
        ProviderSpec::Kubevirt(target) => {
            bind_kubevirt(target, spec.kubevirt.as_ref().ok_or_else(missing)?)
        }
        ProviderSpec::Nutanix(target) => {
            bind_nutanix(target, spec.nutanix.as_ref().ok_or_else(missing)?)
        }
        ProviderSpec::VMwareCloudDirector(target) => bind_vmware_cloud_director(
            target,
            spec.vmwareclouddirector.as_ref().ok_or_else(missing)?,
        ),
    }

    tracing::debug!(preset = %preset.name, provider = %kind, "bound preset credentials");
    Ok(cloud)
}

/// `value` が空でなければ `target` を上書き
fn overlay(target: &mut String, value: &str) {
    if !value.is_empty() {
        *target = value.to_string();
    }
}

fn fill_default(target: &mut String, default: &str) {
    if target.is_empty() && !default.is_empty() {
        *target = default.to_string();
    }
}

fn bind_fake(target: &mut FakeCloudSpec, creds: &FakeCredentials) {
    overlay(&mut target.token, &creds.token);
}

fn bind_aws(target: &mut AwsCloudSpec, creds: &AwsCredentials) {
    overlay(&mut target.access_key_id, &creds.access_key_id);
    overlay(&mut target.secret_access_key, &creds.secret_access_key);
    overlay(&mut target.assume_role_arn, &creds.assume_role_arn);
    overlay(&mut target.assume_role_external_id, &creds.assume_role_external_id);
    overlay(&mut target.vpc_id, &creds.vpc_id);
    overlay(&mut target.route_table_id, &creds.route_table_id);
    overlay(&mut target.instance_profile_name, &creds.instance_profile_name);
    overlay(&mut target.security_group_id, &creds.security_group_id);
    overlay(&mut target.control_plane_role_arn, &creds.control_plane_role_arn);
}

fn bind_azure(target: &mut AzureCloudSpec, creds: &AzureCredentials) {
    overlay(&mut target.subscription_id, &creds.subscription_id);
    overlay(&mut target.client_id, &creds.client_id);
    overlay(&mut target.client_secret, &creds.client_secret);
    overlay(&mut target.tenant_id, &creds.tenant_id);
    overlay(&mut target.resource_group, &creds.resource_group);
    overlay(&mut target.vnet_resource_group, &creds.vnet_resource_group);
    overlay(&mut target.vnet_name, &creds.vnet_name);
    overlay(&mut target.subnet_name, &creds.subnet_name);
    overlay(&mut target.route_table_name, &creds.route_table_name);
    overlay(&mut target.security_group, &creds.security_group);
    overlay(&mut target.load_balancer_sku, &creds.load_balancer_sku);
}

fn bind_digitalocean(target: &mut DigitaloceanCloudSpec, creds: &DigitaloceanCredentials) {
    overlay(&mut target.token, &creds.token);
}

fn bind_gcp(target: &mut GcpCloudSpec, creds: &GcpCredentials) {
    overlay(&mut target.service_account, &creds.service_account);
    overlay(&mut target.network, &creds.network);
    overlay(&mut target.subnetwork, &creds.subnetwork);
}

fn bind_hetzner(target: &mut HetznerCloudSpec, creds: &HetznerCredentials) {
    overlay(&mut target.token, &creds.token);
    overlay(&mut target.network, &creds.network);
}

fn bind_openstack(
    target: &mut OpenstackCloudSpec,
    creds: &OpenstackCredentials,
    dc: Option<&DatacenterSpecOpenstack>,
) {
    overlay(&mut target.username, &creds.username);
    overlay(&mut target.password, &creds.password);
    overlay(&mut target.project, &creds.project);
    overlay(&mut target.project_id, &creds.project_id);
    overlay(&mut target.domain, &creds.domain);
    overlay(&mut target.application_credential_id, &creds.application_credential_id);
    overlay(
        &mut target.application_credential_secret,
        &creds.application_credential_secret,
    );
    if creds.use_token {
        target.use_token = true;
    }
    overlay(&mut target.network, &creds.network);
    overlay(&mut target.security_groups, &creds.security_groups);
    overlay(&mut target.floating_ip_pool, &creds.floating_ip_pool);
    overlay(&mut target.router_id, &creds.router_id);
    overlay(&mut target.subnet_id, &creds.subnet_id);

    if let Some(enforce) = creds.enforce_floating_ip {
        target.enforce_floating_ip = Some(enforce);
    }
    if target.enforce_floating_ip.is_none() {
        target.enforce_floating_ip = dc.map(|dc| dc.enforce_floating_ip);
    }
}

fn bind_packet(target: &mut PacketCloudSpec, creds: &PacketCredentials) {
    overlay(&mut target.api_key, &creds.api_key);
    overlay(&mut target.project_id, &creds.project_id);
    overlay(&mut target.billing_cycle, &creds.billing_cycle);
    fill_default(&mut target.billing_cycle, DEFAULT_PACKET_BILLING_CYCLE);
}

fn bind_vsphere(
    target: &mut VSphereCloudSpec,
    creds: &VSphereCredentials,
    dc: Option<&DatacenterSpecVSphere>,
) {
    overlay(&mut target.username, &creds.username);
    overlay(&mut target.password, &creds.password);
    overlay(&mut target.vm_net_name, &creds.vm_net_name);
    overlay(&mut target.datastore, &creds.datastore);
    overlay(&mut target.datastore_cluster, &creds.datastore_cluster);
    overlay(&mut target.resource_pool, &creds.resource_pool);
    overlay(&mut target.storage_policy, &creds.storage_policy);
    if let Some(dc) = dc {
        fill_default(&mut target.storage_policy, &dc.default_storage_policy);
    }
}

fn bind_alibaba(target: &mut AlibabaCloudSpec, creds: &AlibabaCredentials) {
    overlay(&mut target.access_key_id, &creds.access_key_id);
    overlay(&mut target.access_key_secret, &creds.access_key_secret);
}

fn bind_anexia(target: &mut AnexiaCloudSpec, creds: &AnexiaCredentials) {
    overlay(&mut target.token, &creds.token);
}

fn bind_kubevirt(target: &mut KubevirtCloudSpec, creds: &KubevirtCredentials) {
    overlay(&mut target.kubeconfig, &creds.kubeconfig);
}

fn bind_nutanix(target: &mut NutanixCloudSpec, creds: &NutanixCredentials) {
    overlay(&mut target.username, &creds.username);
    overlay(&mut target.password, &creds.password);
    overlay(&mut target.proxy_url, &creds.proxy_url);
    overlay(&mut target.cluster_name, &creds.cluster_name);
    overlay(&mut target.project_name, &creds.project_name);
    overlay(&mut target.csi_username, &creds.csi_username);
    overlay(&mut target.csi_password, &creds.csi_password);
    overlay(&mut target.csi_endpoint, &creds.csi_endpoint);
}

fn bind_vmware_cloud_director(
    target: &mut VMwareCloudDirectorCloudSpec,
    creds: &VMwareCloudDirectorCredentials,
) {
    overlay(&mut target.username, &creds.username);
    overlay(&mut target.password, &creds.password);
    overlay(&mut target.api_token, &creds.api_token);
    overlay(&mut target.organization, &creds.organization);
    overlay(&mut target.vdc, &creds.vdc);
    overlay(&mut target.ovdc_network, &creds.ovdc_network);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn openstack_preset(enforce: Option<bool>) -> Preset {
        Preset::new("os").with_spec(|spec| {
            spec.openstack = Some(OpenstackCredentials {
                username: "d".to_string(),
                password: "c".to_string(),
                project: "a".to_string(),
                domain: "b".to_string(),
                enforce_floating_ip: enforce,
                ..Default::default()
            })
        })
    }

    fn openstack_dc(enforce: bool) -> Datacenter {
        let mut dc = Datacenter::new("os-dc");
        dc.spec.openstack = Some(DatacenterSpecOpenstack {
            enforce_floating_ip: enforce,
        });
        dc
    }

    fn openstack_result(cloud: CloudSpec) -> OpenstackCloudSpec {
        match cloud.provider {
            Some(ProviderSpec::Openstack(spec)) => spec,
            other => panic!("Expected Openstack provider, got {:?}", other),
        }
    }

    #[test]
    fn test_no_provider() {
        let preset = Preset::new("test").with_spec(|s| s.fake = Some(FakeCredentials::new("x")));
        let err = bind_credentials(&preset, CloudSpec::default(), None).unwrap_err();
        assert_eq!(err.to_string(), "can not find provider to set credentials");
    }

    #[test]
    fn test_missing_bundle() {
        let preset = Preset::new("test");
        let cloud = CloudSpec::new(ProviderSpec::empty(ProviderKind::Azure));
        let err = bind_credentials(&preset, cloud, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "the preset test doesn't contain credential for Azure provider"
        );
    }

    #[test]
    fn test_fake_binding_is_idempotent() {
        let preset = Preset::new("test").with_spec(|s| s.fake = Some(FakeCredentials::new("abc")));
        let cloud = CloudSpec::new(ProviderSpec::empty(ProviderKind::Fake));

        let once = bind_credentials(&preset, cloud.clone(), None).unwrap();
        let twice = bind_credentials(&preset, once.clone(), None).unwrap();

        assert_eq!(
            once,
            CloudSpec::new(ProviderSpec::Fake(FakeCloudSpec {
                token: "abc".to_string()
            }))
        );
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_bundle_field_keeps_existing_value() {
        let preset = Preset::new("test").with_spec(|s| {
            s.hetzner = Some(HetznerCredentials {
                token: "secret".to_string(),
                network: String::new(),
            })
        });
        let cloud = CloudSpec::new(ProviderSpec::Hetzner(HetznerCloudSpec {
            token: String::new(),
            network: "existing-net".to_string(),
        }));

        let bound = bind_credentials(&preset, cloud, None).unwrap();
        assert_eq!(
            bound.provider,
            Some(ProviderSpec::Hetzner(HetznerCloudSpec {
                token: "secret".to_string(),
                network: "existing-net".to_string(),
            }))
        );
    }

    #[test]
    fn test_datacenter_name_is_preserved() {
        let preset = Preset::new("test").with_spec(|s| {
            s.kubevirt = Some(KubevirtCredentials {
                kubeconfig: "test".to_string(),
            })
        });
        let cloud = CloudSpec::new(ProviderSpec::empty(ProviderKind::Kubevirt)).with_datacenter("kv-1");

        let bound = bind_credentials(&preset, cloud, None).unwrap();
        assert_eq!(bound.datacenter_name, "kv-1");
    }

    #[test]
    fn test_openstack_floating_ip_filled_from_datacenter() {
        let cloud = CloudSpec::new(ProviderSpec::empty(ProviderKind::Openstack));
        let bound = bind_credentials(&openstack_preset(None), cloud, Some(&openstack_dc(false)))
            .unwrap();

        let spec = openstack_result(bound);
        assert_eq!(spec.enforce_floating_ip, Some(false));
        assert_eq!(spec.username, "d");
        assert_eq!(spec.password, "c");
        assert_eq!(spec.project, "a");
        assert_eq!(spec.domain, "b");
    }

    #[test]
    fn test_openstack_floating_ip_already_set_is_kept() {
        let cloud = CloudSpec::new(ProviderSpec::Openstack(OpenstackCloudSpec {
            enforce_floating_ip: Some(true),
            ..Default::default()
        }));
        let bound = bind_credentials(&openstack_preset(None), cloud, Some(&openstack_dc(false)))
            .unwrap();

        assert_eq!(openstack_result(bound).enforce_floating_ip, Some(true));
    }

    #[test]
    fn test_openstack_preset_override_beats_datacenter() {
        let cloud = CloudSpec::new(ProviderSpec::empty(ProviderKind::Openstack));
        let bound = bind_credentials(
            &openstack_preset(Some(true)),
            cloud,
            Some(&openstack_dc(false)),
        )
        .unwrap();

        assert_eq!(openstack_result(bound).enforce_floating_ip, Some(true));
    }

    #[test]
    fn test_openstack_without_datacenter_stays_unset() {
        let cloud = CloudSpec::new(ProviderSpec::empty(ProviderKind::Openstack));
        let bound = bind_credentials(&openstack_preset(None), cloud, None).unwrap();

        assert_eq!(openstack_result(bound).enforce_floating_ip, None);
    }

    #[test]
    fn test_packet_billing_cycle_default() {
        let preset = Preset::new("test").with_spec(|s| {
            s.packet = Some(PacketCredentials {
                api_key: "secret".to_string(),
                project_id: "project".to_string(),
                ..Default::default()
            })
        });
        let cloud = CloudSpec::new(ProviderSpec::empty(ProviderKind::Packet));

        let bound = bind_credentials(&preset, cloud, None).unwrap();
        assert_eq!(
            bound.provider,
            Some(ProviderSpec::Packet(PacketCloudSpec {
                api_key: "secret".to_string(),
                project_id: "project".to_string(),
                billing_cycle: DEFAULT_PACKET_BILLING_CYCLE.to_string(),
            }))
        );
    }

    #[test]
    fn test_packet_billing_cycle_not_overridden() {
        let preset = Preset::new("test").with_spec(|s| {
            s.packet = Some(PacketCredentials {
                api_key: "secret".to_string(),
                ..Default::default()
            })
        });
        let cloud = CloudSpec::new(ProviderSpec::Packet(PacketCloudSpec {
            billing_cycle: "daily".to_string(),
            ..Default::default()
        }));

        let bound = bind_credentials(&preset, cloud, None).unwrap();
        match bound.provider {
            Some(ProviderSpec::Packet(spec)) => assert_eq!(spec.billing_cycle, "daily"),
            other => panic!("Expected Packet provider, got {:?}", other),
        }
    }

    #[test]
    fn test_vsphere_storage_policy_from_datacenter() {
        let preset = Preset::new("test").with_spec(|s| {
            s.vsphere = Some(VSphereCredentials {
                username: "bob".to_string(),
                password: "secret".to_string(),
                ..Default::default()
            })
        });
        let mut dc = Datacenter::new("vsphere-dc");
        dc.spec.vsphere = Some(DatacenterSpecVSphere {
            default_storage_policy: "fake_storage_policy".to_string(),
        });
        let cloud = CloudSpec::new(ProviderSpec::empty(ProviderKind::VSphere));

        let bound = bind_credentials(&preset, cloud, Some(&dc)).unwrap();
        assert_eq!(
            bound.provider,
            Some(ProviderSpec::VSphere(VSphereCloudSpec {
                username: "bob".to_string(),
                password: "secret".to_string(),
                storage_policy: "fake_storage_policy".to_string(),
                ..Default::default()
            }))
        );
    }

    #[test]
    fn test_vsphere_preset_storage_policy_wins() {
        let preset = Preset::new("test").with_spec(|s| {
            s.vsphere = Some(VSphereCredentials {
                storage_policy: "gold".to_string(),
                ..Default::default()
            })
        });
        let mut dc = Datacenter::new("vsphere-dc");
        dc.spec.vsphere = Some(DatacenterSpecVSphere {
            default_storage_policy: "bronze".to_string(),
        });
        let cloud = CloudSpec::new(ProviderSpec::empty(ProviderKind::VSphere));

        let bound = bind_credentials(&preset, cloud, Some(&dc)).unwrap();
        match bound.provider {
            Some(ProviderSpec::VSphere(spec)) => assert_eq!(spec.storage_policy, "gold"),
            other => panic!("Expected VSphere provider, got {:?}", other),
        }
    }

    #[test]
    fn test_every_provider_reports_missing_bundle_by_name() {
        let preset = Preset::new("empty");
        for kind in ProviderKind::ALL {
            let cloud = CloudSpec::new(ProviderSpec::empty(kind));
            let err = bind_credentials(&preset, cloud, None).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!(
                    "the preset empty doesn't contain credential for {} provider",
                    kind.name()
                )
            );
        }
    }
}
