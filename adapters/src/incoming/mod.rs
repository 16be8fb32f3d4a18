pub mod http_axum;
