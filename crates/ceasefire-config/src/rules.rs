//! Typed vote rules (validated configuration)

use std::time::Duration;

use crate::schema::RawConfig;

/// Validated, typed vote tuning. Read at startup and static for the lifetime
/// of a game session.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteRules {
    /// Ratio of yes votes to eligible players required to surrender, inclusive
    /// threshold in [0.0, 1.0]
    pub required_votes: f64,

    /// Vote duration before non-voters default to "no"
    pub timeout: Duration,

    /// Wait after a resolved vote before the next one may start
    pub cooldown: Duration,

    /// How long the match must run before surrenders become available
    pub start_lockout: Duration,
}

impl VoteRules {
    /// Convert a validated raw config into typed rules
    pub fn from_raw(raw: RawConfig) -> Self {
        Self {
            required_votes: raw.vote.required_votes,
            timeout: Duration::from_secs(raw.vote.timeout_seconds),
            cooldown: Duration::from_secs(raw.vote.cooldown_seconds),
            start_lockout: Duration::from_secs(raw.vote.start_lockout_seconds),
        }
    }

    /// Required ratio rendered as a whole percentage for chat messages
    pub fn required_percent(&self) -> u32 {
        (self.required_votes * 100.0).round() as u32
    }
}

impl Default for VoteRules {
    fn default() -> Self {
        Self::from_raw(RawConfig {
            config_version: crate::CURRENT_CONFIG_VERSION,
            vote: Default::default(),
        })
    }
}
