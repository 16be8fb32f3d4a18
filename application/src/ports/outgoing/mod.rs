pub mod balance_store;
pub mod history_store;
pub mod key_lock;
