use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Dashboard(args) => commands::dashboard::handle(&args, ctx, flags).await,
        Commands::Record(args) => commands::record::handle(&args, ctx, flags).await,
        Commands::Forecast => commands::forecast::handle(ctx, flags).await,
        Commands::Classify(args) => commands::classify::handle(&args, ctx, flags).await,
        Commands::Weekly(args) => commands::weekly::handle(&args, ctx, flags).await,
        Commands::Health => commands::health::handle(ctx, flags).await,
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
