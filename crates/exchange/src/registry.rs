use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use sweepstake_core::{Instrument, InstrumentCode, ParticipantId};
use sweepstake_matching::{MatchingEngine, Withdrawal};
use sweepstake_ports::RegistryError;

use crate::config::ConfigError;

/// Engine for one instrument behind its own lock
pub type SharedEngine = Arc<RwLock<MatchingEngine>>;

/// Roster of instruments, each with its own locked matching engine
///
/// Built once at startup. The map never changes shape afterwards, so two
/// codes never contend and a lookup only ever clones an `Arc`.
pub struct InstrumentRegistry {
    engines: DashMap<InstrumentCode, SharedEngine>,
    roster: Vec<InstrumentCode>,
}

impl InstrumentRegistry {
    pub fn new(roster: Vec<InstrumentCode>) -> Result<Self, ConfigError> {
        let engines = DashMap::with_capacity(roster.len());
        for code in &roster {
            let engine = Arc::new(RwLock::new(MatchingEngine::new(code.clone())));
            if engines.insert(code.clone(), engine).is_some() {
                return Err(ConfigError::InvalidInstrument(format!(
                    "{code} is listed more than once"
                )));
            }
        }

        Ok(Self { engines, roster })
    }

    /// Codes in roster order
    pub fn roster(&self) -> &[InstrumentCode] {
        &self.roster
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    /// Look up the engine for a code
    ///
    /// The map guard is released before the caller takes the engine lock.
    pub fn engine(&self, code: &InstrumentCode) -> Result<SharedEngine, RegistryError> {
        self.engines
            .get(code)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| RegistryError::NotFound(code.to_string()))
    }

    /// Run `f` under the instrument's shared lock
    pub fn read<T>(
        &self,
        code: &InstrumentCode,
        f: impl FnOnce(&MatchingEngine) -> T,
    ) -> Result<T, RegistryError> {
        let engine = self.engine(code)?;
        let guard = engine.read();
        Ok(f(&guard))
    }

    /// Run `f` under the instrument's exclusive lock
    ///
    /// The lock is held for the whole closure, so a registry update and
    /// the matching book change commit together.
    pub fn write<T>(
        &self,
        code: &InstrumentCode,
        f: impl FnOnce(&mut MatchingEngine) -> T,
    ) -> Result<T, RegistryError> {
        let engine = self.engine(code)?;
        let mut guard = engine.write();
        Ok(f(&mut guard))
    }

    pub fn is_valid(&self, code: &InstrumentCode) -> bool {
        self.engines.contains_key(code)
    }

    pub fn is_dropped(&self, code: &InstrumentCode) -> Result<bool, RegistryError> {
        self.read(code, |engine| engine.instrument().is_dropped())
    }

    pub fn is_owned(&self, code: &InstrumentCode) -> Result<bool, RegistryError> {
        self.read(code, |engine| engine.instrument().is_owned())
    }

    pub fn is_owner(
        &self,
        code: &InstrumentCode,
        participant: &ParticipantId,
    ) -> Result<bool, RegistryError> {
        self.read(code, |engine| engine.instrument().is_owner(participant))
    }

    pub fn owner(&self, code: &InstrumentCode) -> Result<Option<ParticipantId>, RegistryError> {
        self.read(code, |engine| engine.owner().cloned())
    }

    /// Assign an owner, returning the previous one
    pub fn set_owner(
        &self,
        code: &InstrumentCode,
        participant: ParticipantId,
    ) -> Result<Option<ParticipantId>, RegistryError> {
        self.write(code, |engine| engine.assign_owner(participant))?
    }

    /// Withdraw an instrument; a second drop changes nothing
    pub fn drop(&self, code: &InstrumentCode) -> Result<Withdrawal, RegistryError> {
        self.write(code, |engine| engine.drop_instrument())
    }

    /// Snapshot of every registry entry, in roster order
    pub fn instruments(&self) -> Vec<Instrument> {
        self.roster
            .iter()
            .filter_map(|code| self.read(code, |engine| engine.instrument().clone()).ok())
            .collect()
    }
}
