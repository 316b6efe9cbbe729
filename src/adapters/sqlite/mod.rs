//! SQLite persistence adapter.

mod payment_store;

pub use payment_store::SqlitePaymentStore;
