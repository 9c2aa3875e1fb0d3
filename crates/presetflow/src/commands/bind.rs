use super::load_manifest;
use crate::context::Context;
use crate::output::{OutputFormat, print_structured};
use anyhow::{Context as _, anyhow, bail};
use presetflow_core::CloudSpec;
use std::path::PathBuf;

pub struct BindArgs {
    pub name: String,
    pub provider: Option<String>,
    pub cloud_spec: Option<PathBuf>,
    pub datacenter: Option<String>,
    pub manifest: Option<PathBuf>,
}

pub async fn handle(ctx: &Context, args: BindArgs) -> anyhow::Result<()> {
    let user = ctx.user()?;

    let mut cloud = match &args.cloud_spec {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read cloud spec {}", path.display()))?;
            serde_json::from_str::<CloudSpec>(&content)
                .with_context(|| format!("invalid cloud spec {}", path.display()))?
        }
        None => CloudSpec::default(),
    };

    if let Some(name) = args.provider.as_deref() {
        let requested = CloudSpec::for_provider_name(name);
        match (cloud.kind(), requested.kind()) {
            (None, _) => cloud.provider = requested.provider,
            (Some(current), Some(wanted)) if current != wanted => {
                bail!("cloud spec selects {} but --provider asks for {}", current, wanted)
            }
            (Some(_), None) => bail!("unknown provider: {}", name),
            _ => {}
        }
    }

    let datacenter = match args.datacenter.as_deref() {
        Some(dc_name) => {
            let (path, manifest) = load_manifest(args.manifest)?;
            let datacenter = manifest.datacenter(dc_name).cloned().ok_or_else(|| {
                anyhow!("datacenter {} is not declared in {}", dc_name, path.display())
            })?;
            Some(datacenter)
        }
        None => None,
    };

    // データセンター名が未設定ならデータセンターの名前を使う
    if cloud.datacenter_name.is_empty()
        && let Some(dc) = &datacenter
    {
        cloud.datacenter_name = dc.name.clone();
    }

    let bound = ctx
        .provider
        .set_cloud_credentials(
            &user,
            ctx.project().unwrap_or_default(),
            &args.name,
            cloud,
            datacenter.as_ref(),
        )
        .await?;

    let format = match ctx.output {
        OutputFormat::Yaml => OutputFormat::Yaml,
        _ => OutputFormat::Json,
    };
    print_structured(format, &bound)
}
