pub mod account_service;
pub mod aggregation_service;
pub mod budget_service;
pub mod export_service;
pub mod ledger_service;
pub mod liability_service;
pub mod sync_service;
