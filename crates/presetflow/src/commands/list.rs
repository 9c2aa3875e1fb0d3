use crate::context::Context;
use crate::output::{OutputFormat, print_preset_table, print_structured};
use colored::Colorize;

pub async fn handle(ctx: &Context) -> anyhow::Result<()> {
    let user = ctx.user()?;
    let listing = ctx
        .provider
        .get_presets_with_warnings(&user, ctx.project())
        .await?;

    // 一部のシードが読めなかった場合も結果は表示し、警告はstderrへ
    for warning in &listing.warnings {
        eprintln!("{} {}", "⚠".yellow(), warning);
    }

    match ctx.output {
        OutputFormat::Table => {
            if listing.presets.is_empty() {
                println!("No presets visible to {}", user.email);
            } else {
                print_preset_table(&listing.presets);
            }
        }
        format => print_structured(format, &listing.presets)?,
    }

    Ok(())
}
