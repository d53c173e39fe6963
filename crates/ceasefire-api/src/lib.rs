//! Wire protocol for the ceasefire sidecar
//!
//! The host game process and the sidecar exchange newline-delimited JSON:
//! - `HostInput` lines flow from the host to the sidecar (player commands,
//!   roster changes, match state changes)
//! - `ServiceOutput` lines flow back (chat messages to deliver, defeat
//!   declarations)
//!
//! Each line is one self-contained JSON object; a malformed line is rejected
//! without affecting subsequent lines.

mod commands;
mod events;

pub use commands::*;
pub use events::*;

use thiserror::Error;

/// Errors encoding or decoding a protocol line
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Malformed line: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Decode one `HostInput` line
pub fn decode_input(line: &str) -> Result<HostInput, ProtocolError> {
    Ok(serde_json::from_str(line)?)
}

/// Encode one `ServiceOutput` as a single JSON line (no trailing newline)
pub fn encode_output(output: &ServiceOutput) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(output)?)
}
