use schemars::{Schema, schema_for};
use shop_core::entities::{
    ClassificationResult, ForecastEntry, InventoryItem, NewTransaction, Transaction, WeeklySummary,
};

use crate::cli::root_commands::{SchemaArgs, SchemaPayload};
use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

/// Handle `smartshop schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schema_of(args.payload);
    // A schema is nested JSON; a table would flatten it into noise.
    let format = match flags.format {
        OutputFormat::Raw => OutputFormat::Raw,
        OutputFormat::Json | OutputFormat::Table => OutputFormat::Json,
    };
    output(&schema, format)
}

fn schema_of(payload: SchemaPayload) -> Schema {
    match payload {
        SchemaPayload::Inventory => schema_for!(Vec<InventoryItem>),
        SchemaPayload::Transaction => schema_for!(Transaction),
        SchemaPayload::NewTransaction => schema_for!(NewTransaction),
        SchemaPayload::Forecast => schema_for!(Vec<ForecastEntry>),
        SchemaPayload::Classification => schema_for!(ClassificationResult),
        SchemaPayload::WeeklySummary => schema_for!(WeeklySummary),
    }
}
