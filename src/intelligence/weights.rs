use std::env;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::models::SignalKind;

/// Per-signal weights. The seven values must sum to exactly 100 so the
/// composite score lands in [0, 100] without rescaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalWeights {
    pub wallet_age: u32,
    pub first_bet_size: u32,
    pub bet_timing: u32,
    pub withdrawal_speed: u32,
    pub market_selection: u32,
    pub win_rate: u32,
    pub no_hedging: u32,
}

pub const REQUIRED_TOTAL: u64 = 100;

/// No single signal may outweigh the whole table.
pub const MAX_WEIGHT: u32 = 100;

impl SignalWeights {
    pub const DEFAULT: SignalWeights = SignalWeights {
        wallet_age: 15,
        first_bet_size: 15,
        bet_timing: 20,
        withdrawal_speed: 15,
        market_selection: 10,
        win_rate: 15,
        no_hedging: 10,
    };

    /// Sum of the seven weights, widened so `u32::MAX` overrides can't wrap.
    pub const fn total(&self) -> u64 {
        self.wallet_age as u64
            + self.first_bet_size as u64
            + self.bet_timing as u64
            + self.withdrawal_speed as u64
            + self.market_selection as u64
            + self.win_rate as u64
            + self.no_hedging as u64
    }

    pub fn get(&self, kind: SignalKind) -> u32 {
        match kind {
            SignalKind::WalletAge => self.wallet_age,
            SignalKind::FirstBetSize => self.first_bet_size,
            SignalKind::BetTiming => self.bet_timing,
            SignalKind::WithdrawalSpeed => self.withdrawal_speed,
            SignalKind::MarketSelection => self.market_selection,
            SignalKind::WinRate => self.win_rate,
            SignalKind::NoHedging => self.no_hedging,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let total = self.total();
        if total != REQUIRED_TOTAL {
            return Err(ConfigError::InvalidWeights { total });
        }
        Ok(())
    }

    /// Defaults overridden by `SIGNAL_WEIGHT_<NAME>` variables, validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut weights = Self::DEFAULT;
        for kind in SignalKind::ALL {
            let var = format!("SIGNAL_WEIGHT_{}", kind.as_str().to_uppercase());
            let Ok(raw) = env::var(&var) else { continue };
            let value: u32 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { var: var.clone(), value: raw.clone() })?;
            if value > MAX_WEIGHT {
                return Err(ConfigError::Invalid { var, value: raw });
            }
            *weights.slot_mut(kind) = value;
        }
        weights.validate()?;
        Ok(weights)
    }

    fn slot_mut(&mut self, kind: SignalKind) -> &mut u32 {
        match kind {
            SignalKind::WalletAge => &mut self.wallet_age,
            SignalKind::FirstBetSize => &mut self.first_bet_size,
            SignalKind::BetTiming => &mut self.bet_timing,
            SignalKind::WithdrawalSpeed => &mut self.withdrawal_speed,
            SignalKind::MarketSelection => &mut self.market_selection,
            SignalKind::WinRate => &mut self.win_rate,
            SignalKind::NoHedging => &mut self.no_hedging,
        }
    }
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

const _: () = assert!(SignalWeights::DEFAULT.total() == REQUIRED_TOTAL);
