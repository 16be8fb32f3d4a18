pub mod key_lock_mutex;
