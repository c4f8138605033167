//! Script format
//!
//! One JSON object per line, tagged by `op`:
//!
//! ```text
//! {"op": "set_owner", "code": "FRA", "participant": "alice"}
//! {"op": "submit", "side": "bid", "code": "FRA", "participant": "bob", "price": "10.00"}
//! {"op": "show_book", "code": "FRA", "side": "bid"}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sweepstake_core::{Instrument, InstrumentCode, Order, ParticipantId, Side, Trade};
use sweepstake_exchange::ExchangeError;

/// A single scripted request against the exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptCommand {
    Submit {
        side: Side,
        code: String,
        participant: String,
        /// Kept as text so malformed prices reach the exchange's validation
        price: String,
    },
    Cancel {
        side: Side,
        code: String,
        participant: String,
    },
    Drop {
        code: String,
    },
    SetOwner {
        code: String,
        participant: String,
    },
    ShowBook {
        code: String,
        side: Side,
    },
    ShowOwners,
    ShowInstruments,
}

/// What happened when a command ran
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ScriptOutcome {
    Traded {
        trade: Trade,
    },
    Accepted {
        order: Order,
        amended: bool,
    },
    Canceled {
        removed: bool,
    },
    Dropped {
        previous_owner: Option<ParticipantId>,
    },
    OwnerSet {
        changed: bool,
    },
    Book {
        code: String,
        side: Side,
        orders: Vec<Order>,
    },
    Owners {
        owners: BTreeMap<InstrumentCode, Option<ParticipantId>>,
    },
    Instruments {
        instruments: Vec<Instrument>,
    },
    /// The exchange refused the request
    Rejected {
        kind: String,
        reason: String,
    },
    /// The script line could not be parsed
    Invalid {
        line: usize,
        reason: String,
    },
}

impl ScriptOutcome {
    pub fn rejected(err: &ExchangeError) -> Self {
        ScriptOutcome::Rejected {
            kind: err.kind().to_string(),
            reason: err.to_string(),
        }
    }

    pub fn is_trade(&self) -> bool {
        matches!(self, ScriptOutcome::Traded { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            ScriptOutcome::Rejected { .. } | ScriptOutcome::Invalid { .. }
        )
    }
}
