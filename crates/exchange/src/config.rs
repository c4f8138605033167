//! Configuration loading for the exchange
//!
//! A JSON document naming the instrument roster, the house participant, the
//! nominal house ask and any ownership assigned at startup. Every field has
//! a default, so `{}` is a valid config for the full tournament roster.

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sweepstake_core::{InstrumentCode, ParticipantId, Price};

/// Teams listed for the tournament
pub const TOURNAMENT_ROSTER: [&str; 20] = [
    "ARG", "AUS", "CAN", "ENG", "FJI", "FRA", "GEO", "IRE", "ITA", "JPN", "NAM", "NZL", "ROM",
    "SAM", "SCO", "RSA", "TGA", "URU", "USA", "WAL",
];

/// Ownership drawn for the tournament sweepstake
const TOURNAMENT_DRAW: [(&str, &str); 20] = [
    ("JPN", "jon"),
    ("ROM", "tbone"),
    ("AUS", "samlloyd"),
    ("FRA", "pedro"),
    ("NAM", "james"),
    ("URU", "darryl"),
    ("NZL", "tommy"),
    ("CAN", "siobhan"),
    ("TGA", "brentkelly"),
    ("SAM", "jonny"),
    ("GEO", "joooe"),
    ("WAL", "joooe"),
    ("SCO", "joshuabalfe"),
    ("ARG", "damtur"),
    ("RSA", "stu"),
    ("ENG", "chrislewis"),
    ("FJI", "johnobrien"),
    ("IRE", "vasman"),
    ("ITA", "johnmc"),
    ("USA", "jjramos"),
];

/// Root configuration for the exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// Instrument codes listed at startup
    #[serde(default = "default_instruments")]
    pub instruments: Vec<String>,

    /// Market-maker participant
    #[serde(default = "default_house")]
    pub house: String,

    /// Price of the ask seeded whenever the house takes ownership
    #[serde(default = "default_house_ask")]
    pub house_ask: Decimal,

    /// Owners assigned at startup, by instrument code
    #[serde(default)]
    pub initial_owners: BTreeMap<String, String>,
}

fn default_instruments() -> Vec<String> {
    TOURNAMENT_ROSTER.iter().map(|c| c.to_string()).collect()
}

fn default_house() -> String {
    "house".to_string()
}

fn default_house_ask() -> Decimal {
    Decimal::ONE
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            instruments: default_instruments(),
            house: default_house(),
            house_ask: default_house_ask(),
            initial_owners: BTreeMap::new(),
        }
    }
}

impl ExchangeConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Full roster with the sweepstake draw already assigned
    pub fn tournament_seed() -> Self {
        let initial_owners = TOURNAMENT_DRAW
            .iter()
            .map(|(code, owner)| (code.to_string(), owner.to_string()))
            .collect();

        Self {
            initial_owners,
            ..Default::default()
        }
    }

    /// Validated roster codes, in configured order
    pub fn instrument_codes(&self) -> Result<Vec<InstrumentCode>, ConfigError> {
        let mut codes: Vec<InstrumentCode> = Vec::with_capacity(self.instruments.len());
        for raw in &self.instruments {
            let code = InstrumentCode::new(raw)
                .map_err(|e| ConfigError::InvalidInstrument(format!("{raw}: {e}")))?;
            if codes.contains(&code) {
                return Err(ConfigError::InvalidInstrument(format!(
                    "{code} is listed more than once"
                )));
            }
            codes.push(code);
        }

        if codes.is_empty() {
            return Err(ConfigError::InvalidInstrument(
                "roster has no instruments".to_string(),
            ));
        }
        Ok(codes)
    }

    pub fn house_participant(&self) -> Result<ParticipantId, ConfigError> {
        ParticipantId::new(&self.house)
            .map_err(|e| ConfigError::InvalidParticipant(format!("house: {e}")))
    }

    pub fn house_ask_price(&self) -> Result<Price, ConfigError> {
        Price::new(self.house_ask)
            .map_err(|e| ConfigError::InvalidPrice(format!("house_ask {}: {e}", self.house_ask)))
    }

    /// Validated startup ownership; every code must be on the roster
    pub fn owners(&self) -> Result<Vec<(InstrumentCode, ParticipantId)>, ConfigError> {
        let roster = self.instrument_codes()?;
        self.initial_owners
            .iter()
            .map(|(raw_code, raw_owner)| {
                let code = InstrumentCode::new(raw_code)
                    .map_err(|e| ConfigError::InvalidInstrument(format!("{raw_code}: {e}")))?;
                if !roster.contains(&code) {
                    return Err(ConfigError::InvalidInstrument(format!(
                        "{code} has an owner but is not on the roster"
                    )));
                }
                let owner = ParticipantId::new(raw_owner)
                    .map_err(|e| ConfigError::InvalidParticipant(format!("{code}: {e}")))?;
                Ok((code, owner))
            })
            .collect()
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Io { path: String, error: String },
    Parse(String),
    InvalidInstrument(String),
    InvalidParticipant(String),
    InvalidPrice(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, error } => {
                write!(f, "Failed to read config file '{}': {}", path, error)
            }
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::InvalidInstrument(e) => write!(f, "Invalid instrument config: {}", e),
            ConfigError::InvalidParticipant(e) => write!(f, "Invalid participant config: {}", e),
            ConfigError::InvalidPrice(e) => write!(f, "Invalid price config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_minimal_config() {
        let config = ExchangeConfig::from_json("{}").unwrap();
        assert_eq!(config, ExchangeConfig::default());
        assert_eq!(config.instruments.len(), 20);
        assert_eq!(config.house, "house");
        assert_eq!(config.house_ask, dec!(1));
        assert!(config.initial_owners.is_empty());
    }

    #[test]
    fn test_parse_custom_config() {
        let json = r#"{
            "instruments": ["FRA", "nzl"],
            "house": "bank",
            "house_ask": "2.50",
            "initial_owners": { "FRA": "alice" }
        }"#;

        let config = ExchangeConfig::from_json(json).unwrap();
        let codes = config.instrument_codes().unwrap();
        assert_eq!(codes[1].as_str(), "NZL");
        assert_eq!(config.house_participant().unwrap().as_str(), "bank");
        assert_eq!(config.house_ask_price().unwrap().inner(), dec!(2.50));

        let owners = config.owners().unwrap();
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].1.as_str(), "alice");
    }

    #[test]
    fn test_rejects_bad_roster() {
        let config = ExchangeConfig::from_json(r#"{"instruments": ["FRA", "FRANCE"]}"#).unwrap();
        assert!(matches!(
            config.instrument_codes(),
            Err(ConfigError::InvalidInstrument(_))
        ));

        let config = ExchangeConfig::from_json(r#"{"instruments": ["FRA", "fra"]}"#).unwrap();
        assert!(config.instrument_codes().is_err());

        let config = ExchangeConfig::from_json(r#"{"instruments": []}"#).unwrap();
        assert!(config.instrument_codes().is_err());
    }

    #[test]
    fn test_rejects_owner_off_roster() {
        let json = r#"{"instruments": ["FRA"], "initial_owners": {"WAL": "alice"}}"#;
        let config = ExchangeConfig::from_json(json).unwrap();
        assert!(matches!(
            config.owners(),
            Err(ConfigError::InvalidInstrument(_))
        ));
    }

    #[test]
    fn test_rejects_non_positive_house_ask() {
        let config = ExchangeConfig::from_json(r#"{"house_ask": 0}"#).unwrap();
        assert!(matches!(
            config.house_ask_price(),
            Err(ConfigError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_parse_error() {
        let err = ExchangeConfig::from_json("{not json").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse config"));
    }

    #[test]
    fn test_tournament_seed_covers_roster() {
        let config = ExchangeConfig::tournament_seed();
        let owners = config.owners().unwrap();
        assert_eq!(owners.len(), 20);

        let wal = owners.iter().find(|(c, _)| c.as_str() == "WAL").unwrap();
        assert_eq!(wal.1.as_str(), "joooe");
    }
}
