use serde::{Deserialize, Serialize};
use std::fmt;

use crate::values::{InstrumentCode, ParticipantId};

/// Lifecycle of an instrument on the exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Lifecycle {
    /// Listed but never assigned or traded
    #[default]
    Unowned,
    /// Has a current owner
    Owned,
    /// Withdrawn from the tournament. Terminal.
    Dropped,
}

impl Lifecycle {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Lifecycle::Dropped)
    }
}

/// Mutation attempted on a dropped instrument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentUnavailable(pub InstrumentCode);

impl fmt::Display for InstrumentUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instrument {} has been dropped", self.0)
    }
}

impl std::error::Error for InstrumentUnavailable {}

/// Registry entry for one instrument: code, lifecycle and current owner
///
/// Fields are private so the lifecycle and the owner can only change together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    code: InstrumentCode,
    lifecycle: Lifecycle,
    owner: Option<ParticipantId>,
}

impl Instrument {
    pub fn new(code: InstrumentCode) -> Self {
        Self {
            code,
            lifecycle: Lifecycle::Unowned,
            owner: None,
        }
    }

    pub fn code(&self) -> &InstrumentCode {
        &self.code
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn owner(&self) -> Option<&ParticipantId> {
        self.owner.as_ref()
    }

    pub fn is_dropped(&self) -> bool {
        self.lifecycle == Lifecycle::Dropped
    }

    pub fn is_owned(&self) -> bool {
        self.owner.is_some()
    }

    pub fn is_owner(&self, participant: &ParticipantId) -> bool {
        self.owner.as_ref() == Some(participant)
    }

    /// Assign a new owner, returning the previous one
    pub fn set_owner(
        &mut self,
        participant: ParticipantId,
    ) -> Result<Option<ParticipantId>, InstrumentUnavailable> {
        if self.is_dropped() {
            return Err(InstrumentUnavailable(self.code.clone()));
        }
        self.lifecycle = Lifecycle::Owned;
        Ok(self.owner.replace(participant))
    }

    /// Withdraw the instrument, returning the owner it had
    ///
    /// Dropping an already dropped instrument is a no-op and returns `None`.
    pub fn withdraw(&mut self) -> Option<ParticipantId> {
        if self.is_dropped() {
            return None;
        }
        self.lifecycle = Lifecycle::Dropped;
        self.owner.take()
    }
}
