//! Periodic driver for the vote engine
//!
//! One loop owns the engine and interleaves player commands with the fixed
//! tick, so command handling and session updates are serialized without any
//! per-session locking.

use ceasefire_util::{MonotonicInstant, PlayerId};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::VoteEngine;

/// Default tick period
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

/// A player command routed into the scheduler loop
#[derive(Debug, Clone)]
pub enum VoteCommand {
    Surrender(PlayerId),
    NoSurrender(PlayerId),
}

/// Drive the engine until the command channel closes.
///
/// Every registered session receives exactly one tick per period; commands
/// arriving between ticks are applied in arrival order.
pub async fn run(
    mut engine: VoteEngine,
    mut commands: mpsc::UnboundedReceiver<VoteCommand>,
    period: Duration,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(period_ms = period.as_millis() as u64, "Vote scheduler running");

    loop {
        tokio::select! {
            cmd = commands.recv() => {
                match cmd {
                    Some(VoteCommand::Surrender(player)) => {
                        engine.handle_surrender(&player, MonotonicInstant::now());
                    }
                    Some(VoteCommand::NoSurrender(player)) => {
                        engine.handle_no_surrender(&player, MonotonicInstant::now());
                    }
                    None => {
                        info!("Command channel closed, vote scheduler stopping");
                        break;
                    }
                }
            }

            _ = ticker.tick() => {
                engine.tick(MonotonicInstant::now());
            }
        }
    }
}
