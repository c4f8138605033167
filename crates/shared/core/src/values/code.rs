use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-letter team code identifying a tradable instrument (e.g. `FRA`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InstrumentCode(String);

impl InstrumentCode {
    pub const LEN: usize = 3;

    /// Validate and normalise a code. Lowercase input is upper-cased.
    pub fn new(value: impl Into<String>) -> Result<Self, &'static str> {
        let s: String = value.into();
        if s.len() != Self::LEN {
            return Err("Instrument code must be exactly three letters");
        }
        if !s.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err("Instrument code must be alphabetic");
        }
        Ok(InstrumentCode(s.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstrumentCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for InstrumentCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for InstrumentCode {
    type Error = &'static str;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        InstrumentCode::new(value)
    }
}

impl TryFrom<String> for InstrumentCode {
    type Error = &'static str;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        InstrumentCode::new(value)
    }
}

impl From<InstrumentCode> for String {
    fn from(code: InstrumentCode) -> String {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_is_uppercased() {
        let code = InstrumentCode::new("fra").unwrap();
        assert_eq!(code.as_str(), "FRA");
    }

    #[test]
    fn test_code_rejects_bad_format() {
        assert!(InstrumentCode::new("FR").is_err());
        assert!(InstrumentCode::new("FRAN").is_err());
        assert!(InstrumentCode::new("F1A").is_err());
        assert!(InstrumentCode::new("").is_err());
    }

    #[test]
    fn test_code_deserialize_validates() {
        let code: InstrumentCode = serde_json::from_str("\"nzl\"").unwrap();
        assert_eq!(code.as_str(), "NZL");
        assert!(serde_json::from_str::<InstrumentCode>("\"NZ\"").is_err());
    }
}
