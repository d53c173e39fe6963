//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Vote tuning
    #[serde(default)]
    pub vote: RawVoteConfig,
}

/// Raw `[vote]` table
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RawVoteConfig {
    /// Ratio of yes votes to eligible players required to surrender,
    /// in [0.0, 1.0]. Default 1.0 (unanimous).
    pub required_votes: f64,

    /// How long to wait in seconds until all non-voters default to a
    /// no-surrender vote
    pub timeout_seconds: u64,

    /// How long to wait in seconds until a failed surrender vote can be
    /// retried
    pub cooldown_seconds: u64,

    /// How long a game needs to be running before surrenders become available
    pub start_lockout_seconds: u64,
}

impl Default for RawVoteConfig {
    fn default() -> Self {
        Self {
            required_votes: 1.0,
            timeout_seconds: 30,
            cooldown_seconds: 300,
            start_lockout_seconds: 1200,
        }
    }
}
