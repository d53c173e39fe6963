//! Per-faction vote session

use ceasefire_config::VoteRules;
use ceasefire_host_api::GameHost;
use ceasefire_util::{FactionId, MonotonicInstant, PlayerId};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use crate::{TimerPhase, VoteTimer};

/// One faction's surrender vote: the ballot map plus its timer.
///
/// Ballots are only meaningful while the timer is Running; they are cleared on
/// every Done -> Cooldown transition. The session itself persists across
/// outcomes and is reused for the next vote.
#[derive(Debug)]
pub struct VoteSession {
    faction: FactionId,
    ballots: HashMap<PlayerId, bool>,
    /// Eligible-player count frozen when the vote starts, so a mid-vote
    /// disconnect cannot make the participation check and the tally diverge
    eligible: u32,
    timer: VoteTimer,
}

impl VoteSession {
    pub fn new(faction: FactionId, rules: &VoteRules) -> Self {
        Self {
            faction,
            ballots: HashMap::new(),
            eligible: 0,
            timer: VoteTimer::new(rules.timeout, rules.cooldown),
        }
    }

    /// Record the player's choice; last vote wins
    pub fn cast_ballot(&mut self, player: PlayerId, surrender: bool) {
        self.ballots.insert(player, surrender);
    }

    pub fn phase(&mut self, now: MonotonicInstant) -> TimerPhase {
        self.timer.phase(now)
    }

    pub fn remaining_cooldown(&mut self, now: MonotonicInstant) -> Option<Duration> {
        self.timer.remaining_cooldown(now)
    }

    /// Start the vote if the timer is Ready: freeze the eligible count and
    /// announce the vote to the faction. No-op from any other phase.
    pub fn begin_if_ready(&mut self, now: MonotonicInstant, host: &dyn GameHost) -> bool {
        if !self.timer.start(now) {
            return false;
        }
        self.eligible = host.living_player_count(&self.faction);
        debug!(
            faction = %self.faction,
            eligible = self.eligible,
            "Surrender vote started"
        );
        host.send_to_faction(
            &self.faction,
            "A surrender vote has been started. Use command surrender or nosurrender.",
        );
        true
    }

    /// Advance the session by one scheduler tick.
    ///
    /// Two-phase check: first the participation short-circuit (everyone voted
    /// -> skip to Done early), then the timeout-based tally. Skip only changes
    /// when Done is reached, never the tally itself.
    pub fn tick(&mut self, now: MonotonicInstant, rules: &VoteRules, host: &dyn GameHost) {
        if self.timer.phase(now) == TimerPhase::Running {
            let total_votes = self.ballots.len() as u32;
            if total_votes >= self.eligible {
                self.timer.skip();
            }
        }

        if self.timer.phase(now) == TimerPhase::Done {
            let yes_votes = self.ballots.values().filter(|&&v| v).count() as u32;
            // Zero eligible players: the vote can never pass
            let ratio = if self.eligible == 0 {
                0.0
            } else {
                f64::from(yes_votes) / f64::from(self.eligible)
            };
            let passed = self.eligible > 0 && ratio >= rules.required_votes;

            debug!(
                faction = %self.faction,
                yes_votes,
                eligible = self.eligible,
                ratio,
                required = rules.required_votes,
                passed,
                "Vote counted"
            );

            if passed {
                host.send_to_all(&format!(
                    "{} has surrendered ({}/{}).",
                    host.faction_name(&self.faction),
                    yes_votes,
                    self.eligible
                ));
                host.declare_defeat(&self.faction);
            } else {
                host.send_to_faction(
                    &self.faction,
                    &format!(
                        "Surrender vote has failed ({}/{}), Required: {}%",
                        yes_votes,
                        self.eligible,
                        rules.required_percent()
                    ),
                );
            }

            self.timer.start_cooldown(now);
            self.ballots.clear();
        }
    }
}
