use anyhow::anyhow;
use serde::Serialize;
use shop_core::entities::{InventoryItem, Transaction};
use shop_core::enums::RowLimit;
use shop_core::filter::{DATE_INPUT_FORMAT, parse_input_date};
use shop_gateway::Gateway;
use shop_sync::{Console, ConsoleEvent, PendingQuery, QueryOutcome, SyncError};

use crate::cli::root_commands::FilterArgs;

/// Apply `--date`/`--rows` and return the read that reflects them.
///
/// Unchanged values issue nothing, so a plain refresh is issued instead.
pub async fn apply_filter<G: Gateway>(
    console: &Console<G>,
    args: &FilterArgs,
) -> anyhow::Result<PendingQuery> {
    let mut latest = None;

    if let Some(rows) = args.rows {
        let limit = RowLimit::try_from(rows)?;
        latest = console
            .handle(ConsoleEvent::SetRowLimit(limit))
            .await
            .into_pending()
            .or(latest);
    }
    if let Some(date) = &args.date {
        let date = parse_input_date(date)?;
        latest = console
            .handle(ConsoleEvent::SetDate(Some(date)))
            .await
            .into_pending()
            .or(latest);
    }

    Ok(match latest {
        Some(pending) => pending,
        None => console.refresh(),
    })
}

/// Turn a settled read into a command result.
pub fn settle(outcome: QueryOutcome) -> anyhow::Result<()> {
    match outcome {
        QueryOutcome::Committed => Ok(()),
        QueryOutcome::Superseded => Err(anyhow!("request was superseded by a newer one")),
        QueryOutcome::Failed(error) => Err(sync_error(error)),
    }
}

/// Banner first, underlying cause second.
pub fn sync_error(error: SyncError) -> anyhow::Error {
    match error.detail() {
        Some(detail) => anyhow!("{detail}").context(error.to_string()),
        None => anyhow!(error),
    }
}

/// Inventory, transactions, and counts for the current filter.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub date: Option<String>,
    pub row_limit: u32,
    pub product_count: usize,
    pub transaction_count: usize,
    pub inventory: Vec<InventoryItem>,
    pub transactions: Vec<Transaction>,
}

impl DashboardView {
    pub fn from_console<G: Gateway>(console: &Console<G>) -> Self {
        let snapshot = console.snapshot();
        let summary = console.summary();
        Self {
            date: snapshot
                .filter
                .date()
                .map(|date| date.format(DATE_INPUT_FORMAT).to_string()),
            row_limit: snapshot.filter.row_limit().get(),
            product_count: summary.product_count,
            transaction_count: summary.transaction_count,
            inventory: snapshot.state.inventory,
            transactions: snapshot.state.transactions,
        }
    }
}

#[cfg(test)]
mod tests {
    use shop_gateway::GatewayError;
    use shop_sync::Concern;

    use super::*;

    #[test]
    fn failure_message_leads_with_banner() {
        let error = SyncError::backend(
            Concern::Data,
            &GatewayError::Api {
                status: 500,
                message: "boom".into(),
            },
        );
        let rendered = format!("{:#}", sync_error(error));
        assert_eq!(
            rendered,
            "Failed to fetch data from backend.: API error (500): boom"
        );
    }

    #[test]
    fn committed_settles_ok() {
        assert!(settle(QueryOutcome::Committed).is_ok());
        assert!(settle(QueryOutcome::Superseded).is_err());
    }
}
