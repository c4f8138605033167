//! Sweepstake Runner - script replay harness
//!
//! Drives an [`sweepstake_exchange::Exchange`] from a JSON-lines script and
//! reports one outcome per command. Chat parsing and reply formatting stay
//! with the transport layer; this is the harness for exercising the
//! exchange end to end.
//!
//! - **Script**: the command and outcome wire format
//! - **Replay**: executes commands and tallies a summary

pub mod replay;
pub mod script;

// Re-export main types
pub use replay::{ReplayError, ReplaySummary, execute, execute_line, replay, replay_collect};
pub use script::{ScriptCommand, ScriptOutcome};
