pub use super::capital_transactions::Entity as CapitalTransactions;
pub use super::properties_master::Entity as PropertiesMaster;
pub use super::scenarios::Entity as Scenarios;
pub use super::transactions::Entity as Transactions;
pub use super::valuations::Entity as Valuations;
