pub mod health;
pub mod points;
