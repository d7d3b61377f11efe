use anyhow::Context;
use shop_core::filter::WeeklyQuery;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::WeeklyArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `smartshop weekly`.
pub async fn handle(
    args: &WeeklyArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let query = WeeklyQuery::new(&args.month, args.week)?;
    let summary = ctx
        .gateway
        .weekly_summary(&query)
        .await
        .with_context(|| {
            format!(
                "failed to fetch summary for {} week {}",
                query.month(),
                query.week()
            )
        })?;
    output(&summary, flags.format)
}
