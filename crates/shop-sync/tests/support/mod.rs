//! In-memory backend for synchronization tests.
//!
//! Calls can be held on a gate until the test releases them, which forces
//! the arrival order a test needs.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use shop_core::entities::{
    ClassificationResult, ForecastEntry, InventoryItem, NewTransaction, ProductClassification,
    Transaction,
};
use shop_core::enums::TransactionKind;
use shop_core::filter::{InventoryQuery, TransactionQuery};
use shop_gateway::{Gateway, GatewayError};
use tokio::sync::oneshot;

pub const TODAY: &str = "02-05-2024";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Inventory,
    Transactions,
    Record,
    Forecast,
    Classify,
}

type GateKey = (Route, Option<String>);

#[derive(Default)]
struct State {
    stock: BTreeMap<String, u64>,
    dated_inventory: HashMap<String, Vec<InventoryItem>>,
    transactions: Vec<Transaction>,
    forecasts: VecDeque<Vec<ForecastEntry>>,
    classifications: VecDeque<ClassificationResult>,
    gates: HashMap<GateKey, VecDeque<oneshot::Receiver<()>>>,
    failures: HashMap<Route, VecDeque<GatewayError>>,
    calls: HashMap<Route, usize>,
    transaction_queries: Vec<TransactionQuery>,
}

#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<State>,
}

impl FakeBackend {
    pub fn with_stock(stock: &[(&str, u64)]) -> Self {
        let backend = Self::default();
        backend.lock().stock = stock
            .iter()
            .map(|(product, units)| ((*product).to_string(), *units))
            .collect();
        backend
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inventory served for one `DD-MM-YYYY` date filter.
    pub fn set_inventory_for(&self, date: &str, items: Vec<InventoryItem>) {
        self.lock().dated_inventory.insert(date.to_string(), items);
    }

    /// Hold the next call to `route` (for `date`, when the route is dated)
    /// until the returned sender fires or is dropped.
    pub fn hold(&self, route: Route, date: Option<&str>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.lock()
            .gates
            .entry((route, date.map(str::to_string)))
            .or_default()
            .push_back(rx);
        tx
    }

    /// Fail the next call to `route` with `error`.
    pub fn fail_next(&self, route: Route, error: GatewayError) {
        self.lock().failures.entry(route).or_default().push_back(error);
    }

    pub fn push_forecast(&self, entries: Vec<ForecastEntry>) {
        self.lock().forecasts.push_back(entries);
    }

    pub fn push_classification(&self, result: ClassificationResult) {
        self.lock().classifications.push_back(result);
    }

    pub fn calls(&self, route: Route) -> usize {
        self.lock().calls.get(&route).copied().unwrap_or(0)
    }

    pub fn transaction_queries(&self) -> Vec<TransactionQuery> {
        self.lock().transaction_queries.clone()
    }

    /// Count the call, then wait on its gate and take any injected failure.
    async fn enter(&self, route: Route, date: Option<&str>) -> Result<(), GatewayError> {
        let gate = {
            let mut state = self.lock();
            *state.calls.entry(route).or_default() += 1;
            state
                .gates
                .get_mut(&(route, date.map(str::to_string)))
                .and_then(VecDeque::pop_front)
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        match self.lock().failures.get_mut(&route).and_then(VecDeque::pop_front) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl Gateway for FakeBackend {
    async fn inventory(&self, query: &InventoryQuery) -> Result<Vec<InventoryItem>, GatewayError> {
        self.enter(Route::Inventory, query.date.as_deref()).await?;
        let state = self.lock();
        if let Some(items) = query.date.as_ref().and_then(|d| state.dated_inventory.get(d)) {
            return Ok(items.clone());
        }
        Ok(state
            .stock
            .iter()
            .map(|(product, units)| InventoryItem::new(product.clone(), *units))
            .collect())
    }

    async fn transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>, GatewayError> {
        self.enter(Route::Transactions, query.date.as_deref()).await?;
        let mut state = self.lock();
        state.transaction_queries.push(query.clone());
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);
        Ok(state
            .transactions
            .iter()
            .rev()
            .filter(|tx| query.date.as_ref().is_none_or(|date| &tx.date == date))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn record_transaction(&self, transaction: &NewTransaction) -> Result<(), GatewayError> {
        self.enter(Route::Record, None).await?;
        let mut state = self.lock();
        let units = state.stock.entry(transaction.product.clone()).or_default();
        match transaction.kind {
            TransactionKind::Buy => *units += transaction.quantity,
            TransactionKind::Sell => {
                if *units < transaction.quantity {
                    return Err(GatewayError::Api {
                        status: 400,
                        message: "Insufficient stock".into(),
                    });
                }
                *units -= transaction.quantity;
            }
        }
        let id = i64::try_from(state.transactions.len()).unwrap_or(i64::MAX) + 1;
        state.transactions.push(Transaction {
            id,
            product: transaction.product.clone(),
            quantity: transaction.quantity,
            kind: transaction.kind,
            date: TODAY.to_string(),
        });
        Ok(())
    }

    async fn forecast(&self) -> Result<Vec<ForecastEntry>, GatewayError> {
        self.enter(Route::Forecast, None).await?;
        Ok(self.lock().forecasts.pop_front().unwrap_or_default())
    }

    async fn classify(&self) -> Result<ClassificationResult, GatewayError> {
        self.enter(Route::Classify, None).await?;
        self.lock()
            .classifications
            .pop_front()
            .ok_or_else(|| GatewayError::Model("no classification scripted".into()))
    }
}

pub fn classification(products: &[&str]) -> ClassificationResult {
    ClassificationResult {
        overall_accuracy: 0.85,
        products: products
            .iter()
            .map(|product| ProductClassification {
                product: (*product).to_string(),
                accuracy: 0.9,
                top_feature: "discount_percent".into(),
                feature_importance: [
                    ("discount_percent".to_string(), 0.5),
                    ("month".to_string(), 0.2),
                    ("stock_left".to_string(), 0.5),
                ]
                .into_iter()
                .collect(),
            })
            .collect(),
    }
}

pub fn forecast(entries: &[(&str, f64)]) -> Vec<ForecastEntry> {
    entries
        .iter()
        .map(|(product, predicted_sales)| ForecastEntry {
            product: (*product).to_string(),
            predicted_sales: *predicted_sales,
        })
        .collect()
}

pub fn products(items: &[InventoryItem]) -> Vec<(&str, u64)> {
    items
        .iter()
        .map(|item| (item.product.as_str(), item.stock))
        .collect()
}
