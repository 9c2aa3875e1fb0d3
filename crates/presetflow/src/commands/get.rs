use crate::context::Context;
use crate::output::{OutputFormat, print_preset_detail, print_structured};

pub async fn handle(ctx: &Context, name: &str) -> anyhow::Result<()> {
    let user = ctx.user()?;
    let preset = ctx.provider.get_preset(&user, ctx.project(), name).await?;

    match ctx.output {
        OutputFormat::Table => print_preset_detail(&preset),
        format => print_structured(format, &preset)?,
    }

    Ok(())
}
