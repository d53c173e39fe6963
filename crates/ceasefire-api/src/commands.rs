//! Host -> sidecar input lines

use ceasefire_util::{FactionId, PlayerId};
use serde::{Deserialize, Serialize};

/// All input the host game process can push to the sidecar
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostInput {
    /// Player issued the "surrender" chat command
    Surrender { player: PlayerId },

    /// Player issued the "nosurrender" chat command
    NoSurrender { player: PlayerId },

    /// Player joined, changed faction, or respawned; `faction` is None while
    /// spectating
    PlayerUpsert {
        player: PlayerId,
        faction: Option<FactionId>,
        #[serde(default = "default_alive")]
        alive: bool,
    },

    /// Player disconnected
    PlayerRemove { player: PlayerId },

    /// Faction display name announcement (sent once per faction)
    FactionInfo { faction: FactionId, name: String },

    /// The match entered or left the active-multiplayer state
    MatchState { active: bool },
}

fn default_alive() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_defaults_to_alive() {
        let line = r#"{"type":"player_upsert","player":"p1","faction":"f1"}"#;
        let input: HostInput = serde_json::from_str(line).unwrap();
        assert!(matches!(input, HostInput::PlayerUpsert { alive: true, .. }));
    }

    #[test]
    fn match_state_round_trips() {
        let input = HostInput::MatchState { active: true };
        let json = serde_json::to_string(&input).unwrap();
        assert_eq!(json, r#"{"type":"match_state","active":true}"#);
    }
}
