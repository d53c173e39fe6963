//! Core vote state machine for ceasefire
//!
//! This crate is the heart of ceasefire, containing:
//! - The four-phase vote timer (Ready -> Running -> Done -> Cooldown -> Ready)
//!   with lazy evaluate-on-read transitions
//! - Per-faction vote sessions (ballots, quorum evaluation, outcome dispatch)
//! - The vote engine: session registry, start-lockout gate, and the chat
//!   command surface
//! - The scheduler loop driving every session once per tick

mod engine;
pub mod scheduler;
mod session;
mod timer;

pub use engine::*;
pub use scheduler::*;
pub use session::*;
pub use timer::*;
