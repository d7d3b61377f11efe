use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct HealthView<'a> {
    base_url: &'a str,
    status: &'static str,
    message: String,
}

/// Handle `smartshop health`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let health = ctx
        .gateway
        .health()
        .await
        .with_context(|| format!("backend at {} is unreachable", ctx.gateway.base_url()))?;
    output(
        &HealthView {
            base_url: ctx.gateway.base_url(),
            status: "ok",
            message: health.message,
        },
        flags.format,
    )
}
