use std::fmt;

use sweepstake_core::{InstrumentCode, ParticipantId, Side};
use sweepstake_ports::{MatchingError, RegistryError};
use thiserror::Error;

use crate::config::ConfigError;

/// Broad class of a rejection, for callers that only need to pick a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or unknown input
    Validation,
    /// Well-formed request the instrument's current state does not allow
    State,
    /// Target order does not exist
    NotFound,
    /// Startup configuration is unusable
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::State => "state",
            ErrorKind::NotFound => "not found",
            ErrorKind::Config => "config",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("Invalid instrument code '{code}': {reason}")]
    InvalidInstrumentCode { code: String, reason: &'static str },

    #[error("Invalid participant: {0}")]
    InvalidParticipant(&'static str),

    #[error("Invalid price '{price}': {reason}")]
    InvalidPrice { price: String, reason: &'static str },

    #[error("Instrument {0} has been dropped")]
    InstrumentDropped(InstrumentCode),

    #[error("{0} has no owner yet")]
    NoOwner(InstrumentCode),

    #[error("{participant} already owns {instrument}")]
    AlreadyOwner {
        instrument: InstrumentCode,
        participant: ParticipantId,
    },

    #[error("{participant} does not own {instrument}")]
    NotOwner {
        instrument: InstrumentCode,
        participant: ParticipantId,
    },

    #[error("No resting {side} from {participant} on {instrument}")]
    NoRestingOrder {
        instrument: InstrumentCode,
        side: Side,
        participant: ParticipantId,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ExchangeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExchangeError::UnknownInstrument(_)
            | ExchangeError::InvalidInstrumentCode { .. }
            | ExchangeError::InvalidParticipant(_)
            | ExchangeError::InvalidPrice { .. } => ErrorKind::Validation,
            ExchangeError::InstrumentDropped(_)
            | ExchangeError::NoOwner(_)
            | ExchangeError::AlreadyOwner { .. }
            | ExchangeError::NotOwner { .. } => ErrorKind::State,
            ExchangeError::NoRestingOrder { .. } => ErrorKind::NotFound,
            ExchangeError::Config(_) => ErrorKind::Config,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExchangeError>;

impl From<RegistryError> for ExchangeError {
    fn from(err: RegistryError) -> Self {
        match err {
            // The roster is fixed, so an unknown code is bad input
            RegistryError::NotFound(code) => ExchangeError::UnknownInstrument(code),
            RegistryError::InstrumentUnavailable(code) => ExchangeError::InstrumentDropped(code),
        }
    }
}

impl From<MatchingError> for ExchangeError {
    fn from(err: MatchingError) -> Self {
        match err {
            MatchingError::Registry(e) => e.into(),
            MatchingError::NoOwner(code) => ExchangeError::NoOwner(code),
            MatchingError::AlreadyOwner {
                instrument,
                participant,
            } => ExchangeError::AlreadyOwner {
                instrument,
                participant,
            },
            MatchingError::NotOwner {
                instrument,
                participant,
            } => ExchangeError::NotOwner {
                instrument,
                participant,
            },
        }
    }
}
