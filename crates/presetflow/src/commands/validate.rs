use super::load_manifest;
use anyhow::bail;
use colored::Colorize;
use presetflow_core::validate_preset;
use std::path::PathBuf;

pub async fn handle(file: Option<PathBuf>) -> anyhow::Result<()> {
    println!("{}", "Validating manifest...".blue());

    let (path, manifest) = load_manifest(file)?;
    println!("Manifest: {}", path.display().to_string().cyan());

    let mut failures = 0usize;
    for preset in &manifest.presets {
        if let Err(e) = validate_preset(preset) {
            eprintln!("  {} {}: {}", "✗".red(), preset.name, e);
            failures += 1;
        }
    }

    if failures > 0 {
        bail!("{} of {} presets are invalid", failures, manifest.presets.len());
    }

    println!("{}", "✓ Manifest is valid".green().bold());
    println!();
    println!("Summary:");
    println!("  presets: {}", manifest.presets.len());
    for preset in &manifest.presets {
        let providers: Vec<_> = preset
            .spec
            .providers()
            .into_iter()
            .map(|kind| kind.name())
            .collect();
        println!("    - {} ({})", preset.name.cyan(), providers.join(", "));
    }
    if !manifest.datacenters.is_empty() {
        println!("  datacenters: {}", manifest.datacenters.len());
        for datacenter in &manifest.datacenters {
            println!("    - {}", datacenter.name.cyan());
        }
    }

    Ok(())
}
