//! Host collaborator interface for ceasefire
//!
//! The vote core never talks to the game directly; everything it needs from
//! the host (who is on which faction, how many are alive, delivering chat,
//! declaring a defeat, whether the match is running) goes through the
//! [`GameHost`] trait. Implementations resolve every call against the host's
//! current state rather than caching, so the core holds no references into the
//! host's object graph.

mod mock;
mod traits;

pub use mock::*;
pub use traits::*;
