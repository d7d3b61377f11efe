use shop_core::entities::NewTransaction;
use shop_core::enums::TransactionKind;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RecordArgs;
use crate::commands::shared::{DashboardView, apply_filter, settle, sync_error};
use crate::context::AppContext;
use crate::output::output;

/// Handle `smartshop record`.
///
/// The filter read issued by `--date`/`--rows` is superseded by the
/// read-after-write refresh, which is the one awaited.
pub async fn handle(
    args: &RecordArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let kind: TransactionKind = args.kind.parse()?;
    let transaction = NewTransaction::new(args.product.trim(), args.quantity, kind);

    let console = ctx.console();
    if args.filter.date.is_some() || args.filter.rows.is_some() {
        drop(apply_filter(&console, &args.filter).await?);
    }

    let pending = console.submit(&transaction).await.map_err(sync_error)?;
    if !flags.quiet {
        eprintln!(
            "recorded {} {} x{}",
            transaction.kind, transaction.product, transaction.quantity
        );
    }
    settle(pending.outcome().await)?;
    output(&DashboardView::from_console(&console), flags.format)
}
