use sweepstake_core::{InstrumentCode, InstrumentUnavailable, ParticipantId};
use thiserror::Error;

/// Errors raised by code-keyed registry lookups and mutations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Instrument not found: {0}")]
    NotFound(String),

    #[error("Instrument unavailable: {0} has been dropped")]
    InstrumentUnavailable(InstrumentCode),
}

impl From<InstrumentUnavailable> for RegistryError {
    fn from(err: InstrumentUnavailable) -> Self {
        RegistryError::InstrumentUnavailable(err.0)
    }
}

/// Domain-level errors for order submission
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchingError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

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
}

impl From<InstrumentUnavailable> for MatchingError {
    fn from(err: InstrumentUnavailable) -> Self {
        MatchingError::Registry(err.into())
    }
}

pub type MatchingResult<T> = std::result::Result<T, MatchingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_converts_through_registry() {
        let code = InstrumentCode::new("WAL").unwrap();
        let err: MatchingError = InstrumentUnavailable(code.clone()).into();
        assert_eq!(
            err,
            MatchingError::Registry(RegistryError::InstrumentUnavailable(code))
        );
        assert_eq!(err.to_string(), "Instrument unavailable: WAL has been dropped");
    }
}
