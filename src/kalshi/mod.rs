pub mod adapter;
pub mod auth;
pub mod client;
pub mod types;

pub use adapter::KalshiAdapter;
pub use auth::KalshiAuth;
pub use client::KalshiClient;
