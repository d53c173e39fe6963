//! Mock game host for testing

use ceasefire_util::{FactionId, PlayerId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::GameHost;

/// A message delivered through the mock, with its audience
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentMessage {
    ToPlayer(PlayerId, String),
    ToFaction(FactionId, String),
    ToAll(String),
}

#[derive(Debug, Default)]
struct MockRoster {
    factions: HashMap<PlayerId, FactionId>,
    living: HashMap<FactionId, u32>,
    names: HashMap<FactionId, String>,
    match_active: bool,
}

/// Mock game host for unit testing the vote core.
///
/// Roster state is settable from tests; every message and defeat declaration
/// is recorded for assertion.
#[derive(Debug, Clone, Default)]
pub struct MockGameHost {
    roster: Arc<Mutex<MockRoster>>,
    messages: Arc<Mutex<Vec<SentMessage>>>,
    defeats: Arc<Mutex<Vec<FactionId>>>,
}

impl MockGameHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a player on a faction
    pub fn join(&self, player: impl Into<PlayerId>, faction: impl Into<FactionId>) {
        let mut roster = self.roster.lock().unwrap();
        roster.factions.insert(player.into(), faction.into());
    }

    /// Remove a player from the roster entirely
    pub fn leave(&self, player: &PlayerId) {
        let mut roster = self.roster.lock().unwrap();
        roster.factions.remove(player);
    }

    /// Set the living-player count reported for a faction
    pub fn set_living(&self, faction: impl Into<FactionId>, count: u32) {
        let mut roster = self.roster.lock().unwrap();
        roster.living.insert(faction.into(), count);
    }

    /// Set the display name reported for a faction
    pub fn set_faction_name(&self, faction: impl Into<FactionId>, name: impl Into<String>) {
        let mut roster = self.roster.lock().unwrap();
        roster.names.insert(faction.into(), name.into());
    }

    pub fn set_match_active(&self, active: bool) {
        self.roster.lock().unwrap().match_active = active;
    }

    /// All messages delivered so far, in order
    pub fn messages(&self) -> Vec<SentMessage> {
        self.messages.lock().unwrap().clone()
    }

    /// Messages delivered to one specific player
    pub fn messages_to(&self, player: &PlayerId) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter_map(|m| match m {
                SentMessage::ToPlayer(p, text) if p == player => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Factions declared defeated so far, in order
    pub fn defeats(&self) -> Vec<FactionId> {
        self.defeats.lock().unwrap().clone()
    }

    pub fn clear_messages(&self) {
        self.messages.lock().unwrap().clear();
    }
}

impl GameHost for MockGameHost {
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
        self.roster
            .lock()
            .unwrap()
            .living
            .get(faction)
            .copied()
            .unwrap_or(0)
    }

    fn send_to_player(&self, player: &PlayerId, text: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(SentMessage::ToPlayer(player.clone(), text.to_string()));
    }

    fn send_to_faction(&self, faction: &FactionId, text: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(SentMessage::ToFaction(faction.clone(), text.to_string()));
    }

    fn send_to_all(&self, text: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(SentMessage::ToAll(text.to_string()));
    }

    fn declare_defeat(&self, faction: &FactionId) {
        self.defeats.lock().unwrap().push(faction.clone());
    }

    fn is_match_active(&self) -> bool {
        self.roster.lock().unwrap().match_active
    }
}
