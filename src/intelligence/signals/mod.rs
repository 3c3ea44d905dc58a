//! The seven insider heuristics. Each is a pure function over fetched records
//! (plus the market cache where resolution timing matters) and never fails:
//! missing data degrades to a zero score with an explanation.

pub mod bet_timing;
pub mod first_bet_size;
pub mod market_selection;
pub mod no_hedging;
pub mod wallet_age;
pub mod win_rate;
pub mod withdrawal_speed;

pub use bet_timing::score_bet_timing;
pub use first_bet_size::score_first_bet_size;
pub use market_selection::score_market_selection;
pub use no_hedging::score_no_hedging;
pub use wallet_age::score_wallet_age;
pub use win_rate::score_win_rate;
pub use withdrawal_speed::score_withdrawal_speed;
