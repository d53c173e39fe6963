//! Vote engine: session registry, start-lockout gate, command surface

use ceasefire_config::VoteRules;
use ceasefire_host_api::GameHost;
use ceasefire_util::{format_duration, FactionId, MonotonicInstant, PlayerId};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::{TimerPhase, VoteSession};

/// The vote engine owns every faction's session plus the process-wide
/// elapsed-since-start gate.
///
/// Commands and ticks mutate the same per-faction state; callers must
/// serialize them (the scheduler loop does so by owning the engine outright).
pub struct VoteEngine {
    rules: VoteRules,
    host: Arc<dyn GameHost>,
    sessions: HashMap<FactionId, VoteSession>,
    /// When the current active-multiplayer match started, None while the game
    /// is out of the qualifying state
    match_started: Option<MonotonicInstant>,
}

impl VoteEngine {
    pub fn new(rules: VoteRules, host: Arc<dyn GameHost>) -> Self {
        info!(
            required_percent = rules.required_percent(),
            timeout_secs = rules.timeout.as_secs(),
            cooldown_secs = rules.cooldown.as_secs(),
            start_lockout_secs = rules.start_lockout.as_secs(),
            "Vote engine initialized"
        );

        Self {
            rules,
            host,
            sessions: HashMap::new(),
            match_started: None,
        }
    }

    /// Number of factions with a session this match
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Time the match has been in the qualifying state
    fn match_elapsed(&self, now: MonotonicInstant) -> Duration {
        match self.match_started {
            Some(started) => now.duration_since(started),
            None => Duration::ZERO,
        }
    }

    /// Lookup-or-create the faction's session
    fn session_entry(&mut self, faction: FactionId, rules: &VoteRules) -> &mut VoteSession {
        self.sessions.entry(faction).or_insert_with_key(|faction| {
            debug!(faction = %faction, "Creating vote session");
            VoteSession::new(faction.clone(), rules)
        })
    }

    /// The "surrender" chat command: start a vote if none is running and cast
    /// a yes ballot. Every precondition failure is a polite reply to the
    /// caller, never a fault.
    pub fn handle_surrender(&mut self, player: &PlayerId, now: MonotonicInstant) {
        debug!(player = %player, "Surrender requested");

        let Some(faction) = self.host.player_faction(player) else {
            self.host
                .send_to_player(player, "Can't surrender without joining a team");
            return;
        };

        let elapsed = self.match_elapsed(now);
        if elapsed <= self.rules.start_lockout {
            let remaining = self.rules.start_lockout.saturating_sub(elapsed);
            self.host.send_to_player(
                player,
                &format!(
                    "Can't surrender at the start of the game. Wait another {}",
                    format_duration(remaining)
                ),
            );
            return;
        }

        let host = Arc::clone(&self.host);
        let rules = self.rules.clone();
        let session = self.session_entry(faction, &rules);

        session.begin_if_ready(now, host.as_ref());

        if session.phase(now) == TimerPhase::Cooldown {
            let remaining = session.remaining_cooldown(now).unwrap_or_default();
            host.send_to_player(
                player,
                &format!(
                    "Surrender is in cooldown. Wait {}",
                    format_duration(remaining)
                ),
            );
            return;
        }

        session.cast_ballot(player.clone(), true);
    }

    /// The "nosurrender" chat command: cast a no ballot into the running vote
    pub fn handle_no_surrender(&mut self, player: &PlayerId, now: MonotonicInstant) {
        let Some(faction) = self.host.player_faction(player) else {
            self.host
                .send_to_player(player, "Can't surrender without joining a team");
            return;
        };

        let host = Arc::clone(&self.host);
        let rules = self.rules.clone();
        let session = self.session_entry(faction, &rules);

        if session.phase(now) != TimerPhase::Running {
            host.send_to_player(player, "There is no surrender vote currently active");
            return;
        }

        session.cast_ballot(player.clone(), false);
    }

    /// One scheduler tick: poll the match state, then advance every session.
    ///
    /// Leaving the qualifying state discards all sessions and resets the
    /// start-time gate, so re-entering restarts the lockout from zero.
    pub fn tick(&mut self, now: MonotonicInstant) {
        if !self.host.is_match_active() {
            if !self.sessions.is_empty() || self.match_started.is_some() {
                debug!(
                    discarded = self.sessions.len(),
                    "Match inactive, discarding vote sessions"
                );
            }
            self.sessions.clear();
            self.match_started = None;
            return;
        }

        if self.match_started.is_none() {
            info!("Match active, lockout countdown started");
            self.match_started = Some(now);
        }

        // Sessions are independent; iteration order must not affect outcomes
        for session in self.sessions.values_mut() {
            session.tick(now, &self.rules, self.host.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ceasefire_host_api::{MockGameHost, SentMessage};

    fn make_rules() -> VoteRules {
        VoteRules {
            required_votes: 0.5,
            timeout: Duration::from_secs(30),
            cooldown: Duration::from_secs(300),
            start_lockout: Duration::from_secs(1200),
        }
    }

    /// Engine with the match already active long enough to clear the lockout.
    /// The returned instant is just past the gate.
    fn unlocked_engine(host: MockGameHost) -> (VoteEngine, MonotonicInstant) {
        let t0 = MonotonicInstant::now();
        host.set_match_active(true);
        let mut engine = VoteEngine::new(make_rules(), Arc::new(host));
        engine.tick(t0);
        (engine, t0 + Duration::from_secs(1201))
    }

    #[test]
    fn factionless_commands_fail_without_mutation() {
        let host = MockGameHost::new();
        let (mut engine, now) = unlocked_engine(host.clone());
        let loner = PlayerId::new("loner");

        engine.handle_surrender(&loner, now);
        engine.handle_no_surrender(&loner, now);

        assert_eq!(
            host.messages_to(&loner),
            vec![
                "Can't surrender without joining a team".to_string(),
                "Can't surrender without joining a team".to_string(),
            ]
        );
        assert_eq!(engine.session_count(), 0);
    }

    #[test]
    fn lockout_reports_remaining_wait() {
        let host = MockGameHost::new();
        host.join("p1", "f1");
        host.set_living("f1", 1);
        host.set_match_active(true);

        let t0 = MonotonicInstant::now();
        let mut engine = VoteEngine::new(make_rules(), Arc::new(host.clone()));
        engine.tick(t0);

        let p1 = PlayerId::new("p1");
        engine.handle_surrender(&p1, t0 + Duration::from_secs(600));

        assert_eq!(
            host.messages_to(&p1),
            vec!["Can't surrender at the start of the game. Wait another 10m 0s".to_string()]
        );
        assert_eq!(engine.session_count(), 0);
    }

    #[test]
    fn surrender_starts_vote_and_casts_yes() {
        let host = MockGameHost::new();
        host.join("p1", "f1");
        host.join("p2", "f1");
        host.set_living("f1", 2);
        let (mut engine, now) = unlocked_engine(host.clone());

        engine.handle_surrender(&PlayerId::new("p1"), now);

        assert_eq!(engine.session_count(), 1);
        assert!(host.messages().iter().any(|m| matches!(
            m,
            SentMessage::ToFaction(_, text)
                if text == "A surrender vote has been started. Use command surrender or nosurrender."
        )));

        // p2 votes yes too; unanimous participation resolves on the next tick
        engine.handle_surrender(&PlayerId::new("p2"), now);
        engine.tick(now + Duration::from_secs(1));

        assert_eq!(host.defeats(), vec![FactionId::new("f1")]);
    }

    #[test]
    fn no_surrender_without_running_vote_is_polite() {
        let host = MockGameHost::new();
        host.join("p1", "f1");
        host.set_living("f1", 1);
        let (mut engine, now) = unlocked_engine(host.clone());

        let p1 = PlayerId::new("p1");
        engine.handle_no_surrender(&p1, now);

        assert_eq!(
            host.messages_to(&p1),
            vec!["There is no surrender vote currently active".to_string()]
        );
        // The command still created the session, bound to Ready
        assert_eq!(engine.session_count(), 1);
        assert!(host.defeats().is_empty());
    }

    #[test]
    fn no_votes_resolve_against_surrender() {
        let host = MockGameHost::new();
        host.join("p1", "f1");
        host.join("p2", "f1");
        host.join("p3", "f1");
        host.join("p4", "f1");
        host.set_living("f1", 4);
        let (mut engine, now) = unlocked_engine(host.clone());

        engine.handle_surrender(&PlayerId::new("p1"), now);
        engine.handle_no_surrender(&PlayerId::new("p2"), now);
        engine.handle_no_surrender(&PlayerId::new("p3"), now);
        engine.handle_no_surrender(&PlayerId::new("p4"), now);

        // Full participation: resolves next tick, 1/4 < 50%
        engine.tick(now + Duration::from_secs(1));

        assert!(host.defeats().is_empty());
        assert!(host.messages().iter().any(|m| matches!(
            m,
            SentMessage::ToFaction(_, text)
                if text == "Surrender vote has failed (1/4), Required: 50%"
        )));
    }

    #[test]
    fn surrender_during_cooldown_reports_remaining_and_casts_nothing() {
        let host = MockGameHost::new();
        host.join("p1", "f1");
        host.join("p2", "f1");
        host.set_living("f1", 2);
        let (mut engine, now) = unlocked_engine(host.clone());

        // Fail a vote: p1 starts it then both players vote no
        engine.handle_surrender(&PlayerId::new("p1"), now);
        engine.handle_no_surrender(&PlayerId::new("p1"), now);
        engine.handle_no_surrender(&PlayerId::new("p2"), now);
        engine.tick(now + Duration::from_secs(1));
        assert!(host.defeats().is_empty());
        host.clear_messages();

        // 120s into the 300s cooldown
        let p1 = PlayerId::new("p1");
        engine.handle_surrender(&p1, now + Duration::from_secs(121));

        assert_eq!(
            host.messages_to(&p1),
            vec!["Surrender is in cooldown. Wait 3m 0s".to_string()]
        );

        // The rejected command cast no ballot: once cooldown ends, a fresh
        // unanimous no-vote still fails rather than counting a stale yes
        let after = now + Duration::from_secs(1) + Duration::from_secs(301);
        engine.handle_surrender(&p1, after);
        engine.handle_no_surrender(&p1, after);
        engine.handle_no_surrender(&PlayerId::new("p2"), after);
        engine.tick(after + Duration::from_secs(1));
        assert!(host.defeats().is_empty());
    }

    #[test]
    fn session_is_reused_across_vote_cycles() {
        let host = MockGameHost::new();
        host.join("p1", "f1");
        host.set_living("f1", 1);
        let (mut engine, now) = unlocked_engine(host.clone());

        engine.handle_surrender(&PlayerId::new("p1"), now);
        engine.tick(now + Duration::from_secs(1));
        assert_eq!(engine.session_count(), 1);

        // After cooldown a second vote runs in the same session
        let later = now + Duration::from_secs(302);
        engine.handle_surrender(&PlayerId::new("p1"), later);
        assert_eq!(engine.session_count(), 1);
    }

    #[test]
    fn leaving_active_state_discards_sessions_and_resets_gate() {
        let host = MockGameHost::new();
        host.join("p1", "f1");
        host.set_living("f1", 1);
        let (mut engine, now) = unlocked_engine(host.clone());

        engine.handle_surrender(&PlayerId::new("p1"), now);
        assert_eq!(engine.session_count(), 1);

        // Match ends
        host.set_match_active(false);
        engine.tick(now + Duration::from_secs(1));
        assert_eq!(engine.session_count(), 0);

        // Match restarts: the lockout counts from zero again
        host.set_match_active(true);
        let restart = now + Duration::from_secs(10);
        engine.tick(restart);

        let p1 = PlayerId::new("p1");
        host.clear_messages();
        engine.handle_surrender(&p1, restart + Duration::from_secs(5));

        assert_eq!(
            host.messages_to(&p1),
            vec!["Can't surrender at the start of the game. Wait another 19m 55s".to_string()]
        );
    }

    #[test]
    fn ticks_drive_every_faction_independently() {
        let host = MockGameHost::new();
        host.join("a1", "alpha");
        host.set_living("alpha", 1);
        host.join("b1", "bravo");
        host.join("b2", "bravo");
        host.join("b3", "bravo");
        host.set_living("bravo", 3);
        let (mut engine, now) = unlocked_engine(host.clone());

        // alpha surrenders unanimously; bravo's vote times out at 1/3
        engine.handle_surrender(&PlayerId::new("a1"), now);
        engine.handle_surrender(&PlayerId::new("b1"), now);
        engine.handle_no_surrender(&PlayerId::new("b2"), now);
        assert_eq!(engine.session_count(), 2);

        engine.tick(now + Duration::from_secs(31));

        assert_eq!(host.defeats(), vec![FactionId::new("alpha")]);
        assert!(host.messages().iter().any(|m| matches!(
            m,
            SentMessage::ToFaction(faction, text)
                if faction == &FactionId::new("bravo")
                    && text == "Surrender vote has failed (1/3), Required: 50%"
        )));
    }
}
