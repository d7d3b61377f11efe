pub mod classify;
pub mod dashboard;
pub mod dispatch;
pub mod forecast;
pub mod health;
pub mod record;
pub mod schema;
pub mod shared;
pub mod weekly;
