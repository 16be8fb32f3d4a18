pub mod in_memory_dashmap;
pub mod key_lock_tokio;
