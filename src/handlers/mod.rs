pub mod dashboard;
pub mod health;
pub mod properties;
pub mod snapshot;
pub mod transactions;
