pub mod config;
pub mod db;
pub mod errors;
pub mod intelligence;
pub mod kalshi;
pub mod metrics;
pub mod models;
pub mod polymarket;
pub mod services;
pub mod venue;
