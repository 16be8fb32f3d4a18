pub mod error;
pub mod history;
pub mod points;
pub mod user;
