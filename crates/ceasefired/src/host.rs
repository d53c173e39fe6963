//! GameHost implementation backed by roster state fed over stdin
//!
//! The host game pushes roster and match-state lines; lookups read the latest
//! snapshot. Messaging and defeat declarations are emitted as `ServiceOutput`
//! JSON lines on stdout (stdout is reserved for the protocol; logs go to
//! stderr).

use ceasefire_api::{encode_output, ServiceOutput};
use ceasefire_host_api::GameHost;
use ceasefire_util::{FactionId, PlayerId};
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing::warn;

#[derive(Debug, Default)]
struct Roster {
    factions: HashMap<PlayerId, FactionId>,
    alive: HashMap<PlayerId, bool>,
    names: HashMap<FactionId, String>,
    match_active: bool,
}

/// Shared roster snapshot + stdout emitter
#[derive(Debug, Clone, Default)]
pub struct BridgeHost {
    roster: Arc<Mutex<Roster>>,
}

impl BridgeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert_player(&self, player: PlayerId, faction: Option<FactionId>, alive: bool) {
        let mut roster = self.roster.lock().unwrap();
        match faction {
            Some(faction) => {
                roster.factions.insert(player.clone(), faction);
                roster.alive.insert(player, alive);
            }
            None => {
                roster.factions.remove(&player);
                roster.alive.remove(&player);
            }
        }
    }

    pub fn remove_player(&self, player: &PlayerId) {
        let mut roster = self.roster.lock().unwrap();
        roster.factions.remove(player);
        roster.alive.remove(player);
    }

    pub fn set_faction_name(&self, faction: FactionId, name: String) {
        self.roster.lock().unwrap().names.insert(faction, name);
    }

    pub fn set_match_active(&self, active: bool) {
        self.roster.lock().unwrap().match_active = active;
    }

    fn emit(&self, output: &ServiceOutput) {
        let line = match encode_output(output) {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "Failed to encode protocol line");
                return;
            }
        };
        let mut stdout = std::io::stdout().lock();
        // Fire-and-forget: a broken pipe means the host is gone and the
        // scheduler will stop once stdin closes
        if writeln!(stdout, "{line}").and_then(|()| stdout.flush()).is_err() {
            warn!("Failed to write protocol line to stdout");
        }
    }
}

impl GameHost for BridgeHost {
    fn player_faction(&self, player: &PlayerId) -> Option<FactionId> {
        self.roster.lock().unwrap().factions.get(player).cloned()
    }

    fn faction_name(&self, faction: &FactionId) -> String {
        let roster = self.roster.lock().unwrap();
        roster
            .names
            .get(faction)
            .cloned()
            .unwrap_or_else(|| faction.to_string())
    }

    fn living_player_count(&self, faction: &FactionId) -> u32 {
        let roster = self.roster.lock().unwrap();
        roster
            .factions
            .iter()
            .filter(|&(player, f)| {
                f == faction && roster.alive.get(player).copied().unwrap_or(false)
            })
            .count() as u32
    }

    fn send_to_player(&self, player: &PlayerId, text: &str) {
        self.emit(&ServiceOutput::MessagePlayer {
            player: player.clone(),
            text: text.to_string(),
        });
    }

    fn send_to_faction(&self, faction: &FactionId, text: &str) {
        self.emit(&ServiceOutput::MessageFaction {
            faction: faction.clone(),
            text: text.to_string(),
        });
    }

    fn send_to_all(&self, text: &str) {
        self.emit(&ServiceOutput::MessageAll {
            text: text.to_string(),
        });
    }

    fn declare_defeat(&self, faction: &FactionId) {
        self.emit(&ServiceOutput::DeclareDefeat {
            faction: faction.clone(),
        });
    }

    fn is_match_active(&self) -> bool {
        self.roster.lock().unwrap().match_active
    }
}
