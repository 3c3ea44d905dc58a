use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertTier {
    High,
    Extreme,
}

impl AlertTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertTier::High => "HIGH",
            AlertTier::Extreme => "EXTREME",
        }
    }
}

impl fmt::Display for AlertTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An alert about to be appended to the alert log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAlert {
    pub address: String,
    pub tier: AlertTier,
    pub details: String,
    pub score_at_time: i32,
    pub created_at: DateTime<Utc>,
}

/// Database row for the alerts table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AlertRow {
    pub id: Uuid,
    pub address: String,
    pub tier: String,
    pub details: String,
    pub score_at_time: i32,
    pub created_at: DateTime<Utc>,
}
