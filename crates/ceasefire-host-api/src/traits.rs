//! Host collaborator trait

use ceasefire_util::{FactionId, PlayerId};

/// Capabilities the vote core needs from the host game.
///
/// All methods are synchronous: lookups read host state that is already in
/// memory, and message delivery is fire-and-forget with no failure signal
/// consumed by the core. Implementations must be callable from the scheduler
/// task at any tick.
pub trait GameHost: Send + Sync {
    /// Faction the player currently belongs to, None while unassigned or
    /// spectating
    fn player_faction(&self, player: &PlayerId) -> Option<FactionId>;

    /// Display name for a faction (falls back to the raw id if the host has
    /// not announced one)
    fn faction_name(&self, faction: &FactionId) -> String;

    /// Number of living players currently on the faction
    fn living_player_count(&self, faction: &FactionId) -> u32;

    /// Deliver a chat message to a single player
    fn send_to_player(&self, player: &PlayerId, text: &str);

    /// Deliver a chat message to every member of a faction
    fn send_to_faction(&self, faction: &FactionId, text: &str);

    /// Deliver a chat message to every player
    fn send_to_all(&self, text: &str);

    /// Declare the faction defeated; triggers the host's end-game processing.
    /// One-shot, no return value consumed.
    fn declare_defeat(&self, faction: &FactionId);

    /// Whether the game is currently in the qualifying active-multiplayer
    /// state. Polled once per scheduler tick.
    fn is_match_active(&self) -> bool;
}
