use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Current or closed exposure of an account in one market, as reported by the venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub market_id: String,
    pub size: Decimal,
    pub realized_pnl: Decimal,
    pub cash_pnl: Decimal,
    pub outcome: String,
}

impl Position {
    pub fn total_pnl(&self) -> Decimal {
        self.realized_pnl + self.cash_pnl
    }
}
