use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a trading participant (the chat user name upstream)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(value: impl Into<String>) -> Result<Self, &'static str> {
        let s: String = value.into();
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Participant id cannot be empty");
        }
        Ok(ParticipantId(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ParticipantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for ParticipantId {
    type Error = &'static str;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        ParticipantId::new(value)
    }
}

impl TryFrom<String> for ParticipantId {
    type Error = &'static str;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        ParticipantId::new(value)
    }
}

impl From<ParticipantId> for String {
    fn from(id: ParticipantId) -> String {
        id.0
    }
}
