use crate::output::{OutputFormat, print_structured};
use anyhow::anyhow;
use presetflow_core::{OperatingSystem, ProviderKind, ssh_user_name};

pub fn handle(provider: Option<&str>, os: Option<&str>, output: OutputFormat) -> anyhow::Result<()> {
    let os = os
        .map(|name| name.parse::<OperatingSystem>().map_err(|e| anyhow!(e)))
        .transpose()?;
    let provider = provider
        .map(|name| name.parse::<ProviderKind>().map_err(|e| anyhow!(e)))
        .transpose()?;

    let user = ssh_user_name(os, provider)?;

    match output {
        OutputFormat::Table => println!("{}", user),
        format => print_structured(format, &serde_json::json!({ "sshUser": user }))?,
    }

    Ok(())
}
