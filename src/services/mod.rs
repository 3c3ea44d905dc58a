pub mod account_scorer;
pub mod scanner;

pub use account_scorer::AccountScorer;
pub use scanner::{run_scan, run_scan_loop, ScanConfig, ScanSummary, TraderDiscovery};
