//! Sidecar -> host output lines

use ceasefire_util::{FactionId, PlayerId};
use serde::{Deserialize, Serialize};

/// All output the sidecar emits for the host game process to act on.
/// Message delivery is fire-and-forget; the sidecar never consumes a result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServiceOutput {
    /// Deliver a chat message to a single player
    MessagePlayer { player: PlayerId, text: String },

    /// Deliver a chat message to every member of a faction
    MessageFaction { faction: FactionId, text: String },

    /// Deliver a chat message to every player
    MessageAll { text: String },

    /// Declare the faction defeated; the host runs its end-game processing
    DeclareDefeat { faction: FactionId },
}
