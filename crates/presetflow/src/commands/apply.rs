use super::load_manifest;
use crate::context::Context;
use anyhow::Context as _;
use colored::Colorize;
use presetflow_core::validate_preset;
use std::path::PathBuf;

pub async fn handle(ctx: &Context, file: Option<PathBuf>, dry_run: bool) -> anyhow::Result<()> {
    let (path, manifest) = load_manifest(file)?;
    println!("Applying {}", path.display().to_string().cyan());

    // 書き込み前に全プリセットを検証
    for preset in &manifest.presets {
        validate_preset(preset).with_context(|| format!("preset {} is invalid", preset.name))?;
    }

    let store = ctx.provider.store();
    let (mut created, mut updated, mut unchanged) = (0usize, 0usize, 0usize);

    for mut preset in manifest.presets {
        let name = preset.name.clone();
        match store.get(&name).await? {
            Some(existing) if existing.spec == preset.spec => {
                unchanged += 1;
                println!("  {} {} unchanged", "=".dimmed(), name);
            }
            Some(existing) => {
                if !dry_run {
                    // 保存済みのバージョンを引き継ぎ、並行更新はConflictになる
                    preset.resource_version = existing.resource_version;
                    ctx.provider.update_preset(preset).await?;
                }
                updated += 1;
                println!("  {} {} updated", "~".yellow(), name);
            }
            None => {
                if !dry_run {
                    ctx.provider.create_preset(preset).await?;
                }
                created += 1;
                println!("  {} {} created", "+".green(), name);
            }
        }
    }

    let summary = format!(
        "{} created, {} updated, {} unchanged",
        created, updated, unchanged
    );
    if dry_run {
        println!("{} (dry run)", summary.yellow());
    } else {
        println!("{} {}", "✓".green().bold(), summary);
    }

    Ok(())
}
