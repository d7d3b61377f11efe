use anyhow::bail;
use serde::Serialize;
use shop_sync::FeatureImportance;
use shop_sync::view::percent;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ClassifyArgs;
use crate::commands::shared::settle;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ProductRow {
    product: String,
    accuracy: String,
    top_feature: String,
}

#[derive(Debug, Serialize)]
struct ClassificationView {
    overall_accuracy: String,
    selected_product: Option<String>,
    products: Vec<ProductRow>,
    features: Vec<FeatureImportance>,
}

/// Handle `smartshop classify`.
pub async fn handle(
    args: &ClassifyArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut options = ctx.options();
    options
        .excluded_features
        .extend(args.exclude.iter().map(|feature| feature.trim().to_string()));
    let console = ctx.console_with(options);

    settle(console.run_classification().outcome().await)?;
    if let Some(product) = &args.product {
        if !console.select_product(product) {
            bail!("product '{product}' is not part of the classification");
        }
    }

    let snapshot = console.snapshot();
    let Some(result) = snapshot.state.classification else {
        bail!("classifier returned no result");
    };
    let view = ClassificationView {
        overall_accuracy: percent(result.overall_accuracy),
        selected_product: snapshot.state.selected_product,
        products: result
            .products
            .into_iter()
            .map(|product| ProductRow {
                accuracy: percent(product.accuracy),
                product: product.product,
                top_feature: product.top_feature,
            })
            .collect(),
        features: console.feature_view(),
    };
    output(&view, flags.format)
}
