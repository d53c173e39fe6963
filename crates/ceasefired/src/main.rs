//! ceasefired - the surrender-vote sidecar
//!
//! A host game process spawns this binary and exchanges newline-delimited
//! JSON with it: roster updates, match state, and player vote commands come
//! in on stdin; chat messages to deliver and defeat declarations go out on
//! stdout. The vote state machine itself lives in ceasefire-core.

mod host;

use anyhow::{Context, Result};
use ceasefire_api::HostInput;
use ceasefire_config::VoteRules;
use ceasefire_core::{scheduler, VoteCommand, VoteEngine};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use host::BridgeHost;

/// Surrender-vote service bridged to a host game over stdio
#[derive(Parser, Debug)]
#[command(name = "ceasefired")]
#[command(about = "Surrender-vote service bridged to a host game over stdio", long_about = None)]
struct Args {
    /// Configuration file path; built-in defaults are used when absent
    #[arg(short, long, env = "CEASEFIRE_CONFIG", default_value = "ceasefire.toml")]
    config: PathBuf,

    /// Log level (logs go to stderr; stdout carries the protocol)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// Read stdin lines, apply roster/match updates, forward vote commands.
/// Returns when stdin closes; dropping `commands` stops the scheduler.
async fn read_host_input(host: BridgeHost, commands: mpsc::UnboundedSender<VoteCommand>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                info!("Host closed stdin");
                return;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read from stdin");
                return;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let input = match ceasefire_api::decode_input(&line) {
            Ok(input) => input,
            Err(e) => {
                warn!(error = %e, "Rejected malformed input line");
                continue;
            }
        };

        match input {
            HostInput::Surrender { player } => {
                if commands.send(VoteCommand::Surrender(player)).is_err() {
                    return;
                }
            }
            HostInput::NoSurrender { player } => {
                if commands.send(VoteCommand::NoSurrender(player)).is_err() {
                    return;
                }
            }
            HostInput::PlayerUpsert {
                player,
                faction,
                alive,
            } => {
                debug!(player = %player, ?faction, alive, "Roster upsert");
                host.upsert_player(player, faction, alive);
            }
            HostInput::PlayerRemove { player } => {
                debug!(player = %player, "Roster remove");
                host.remove_player(&player);
            }
            HostInput::FactionInfo { faction, name } => {
                host.set_faction_name(faction, name);
            }
            HostInput::MatchState { active } => {
                info!(active, "Match state changed");
                host.set_match_active(active);
            }
        }
    }
}

fn load_rules(path: &Path) -> Result<VoteRules> {
    if !path.exists() {
        info!(config_path = %path.display(), "No config file, using defaults");
        return Ok(VoteRules::default());
    }
    let rules = ceasefire_config::load_config(path)
        .with_context(|| format!("Failed to load config from {:?}", path))?;
    info!(config_path = %path.display(), "Configuration loaded");
    Ok(rules)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(args.log_level.clone())),
        )
        .with_writer(std::io::stderr)
        .init();

    let rules = load_rules(&args.config)?;

    let bridge = BridgeHost::new();
    let engine = VoteEngine::new(rules, Arc::new(bridge.clone()));

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let reader = tokio::spawn(read_host_input(bridge, command_tx));

    let mut sigterm =
        signal(SignalKind::terminate()).context("Failed to create SIGTERM handler")?;

    info!("Service running");

    tokio::select! {
        // Scheduler stops on its own once stdin closes and the command
        // channel drops
        _ = scheduler::run(engine, command_rx, scheduler::DEFAULT_TICK_PERIOD) => {}
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received SIGINT, shutting down");
        }
    }

    reader.abort();
    Ok(())
}
