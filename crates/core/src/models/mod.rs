pub mod budget;
pub mod ledger;
pub mod liability;
pub mod session;
pub mod settings;
pub mod summary;
pub mod sync;
pub mod transaction;
