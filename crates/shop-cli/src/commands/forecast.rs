use crate::cli::GlobalFlags;
use crate::commands::shared::settle;
use crate::context::AppContext;
use crate::output::output;

/// Handle `smartshop forecast`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let console = ctx.console();
    settle(console.run_forecast().outcome().await)?;
    output(&console.snapshot().forecast, flags.format)
}
