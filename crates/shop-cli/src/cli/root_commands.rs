use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Show inventory, recent transactions, and summary counts.
    Dashboard(FilterArgs),
    /// Record a buy or sell, then show the refreshed dashboard.
    Record(RecordArgs),
    /// Run the sales forecast model.
    Forecast,
    /// Run the sales-performance classifier.
    Classify(ClassifyArgs),
    /// Weekly sales summary for one month.
    Weekly(WeeklyArgs),
    /// Check that the backend is reachable.
    Health,
    /// Print the JSON schema of a backend payload.
    Schema(SchemaArgs),
}

/// Date and row-limit filter shared by data views.
#[derive(Clone, Debug, Default, Args)]
pub struct FilterArgs {
    /// Only rows for this day (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Transactions to show: 5, 10, 20, 50 or 100
    #[arg(long)]
    pub rows: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct RecordArgs {
    /// Product name
    #[arg(long)]
    pub product: String,

    /// Units moved (greater than zero)
    #[arg(long)]
    pub quantity: u64,

    /// Transaction kind: buy or sell
    #[arg(long)]
    pub kind: String,

    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Clone, Debug, Args)]
pub struct ClassifyArgs {
    /// Product to show feature importances for (defaults to the first)
    #[arg(long)]
    pub product: Option<String>,

    /// Feature names to hide, in addition to the configured ones
    #[arg(long = "exclude", value_name = "FEATURE")]
    pub exclude: Vec<String>,
}

#[derive(Clone, Debug, Args)]
pub struct WeeklyArgs {
    /// Full month name, e.g. January
    #[arg(long)]
    pub month: String,

    /// Week of the month (1-4)
    #[arg(long)]
    pub week: u8,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Payload to describe
    #[arg(value_enum)]
    pub payload: SchemaPayload,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaPayload {
    Inventory,
    Transaction,
    NewTransaction,
    Forecast,
    Classification,
    WeeklySummary,
}
