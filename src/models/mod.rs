pub mod dashboard;
pub mod error;
pub mod ledger;
pub mod property;
pub mod records;
