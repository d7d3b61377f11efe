use crate::cli::GlobalFlags;
use crate::cli::root_commands::FilterArgs;
use crate::commands::shared::{DashboardView, apply_filter, settle};
use crate::context::AppContext;
use crate::output::output;

/// Handle `smartshop dashboard`.
pub async fn handle(
    args: &FilterArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let console = ctx.console();
    let pending = apply_filter(&console, args).await?;
    settle(pending.outcome().await)?;
    output(&DashboardView::from_console(&console), flags.format)
}
