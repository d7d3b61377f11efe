//! Entity structs for the SmartShop backend contract.
//!
//! Field names follow the backend's JSON (`snake_case`). All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` so fixtures can be validated
//! against the same shapes the console parses.

mod classification;
mod forecast;
mod inventory;
mod summary;
mod transaction;

pub use classification::{ClassificationResult, ProductClassification};
pub use forecast::ForecastEntry;
pub use inventory::{InventoryItem, ensure_unique_products};
pub use summary::{ProductBreakdown, WeeklySummary};
pub use transaction::{NewTransaction, Transaction};
