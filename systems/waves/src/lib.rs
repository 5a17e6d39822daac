#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-node, per-wave enemy composition store.
//!
//! [`WaveStore`] maps `(placement node, wave index, enemy kind)` keys to
//! a spawn order and amount. Lookups are deliberately total so the
//! editor never has to distinguish "never configured" from "configured
//! to zero"; writes validate that amounts are non-negative. The whole
//! table flattens into a sorted list of records for persistence through
//! the same generic round-trip the level file uses.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_defence_core::NodeId;
use tower_defence_persistence::{self as persistence, PersistError};

mod editor;

pub use editor::WaveEditorSession;

/// Failures raised by the wave composition store and its editor session.
#[derive(Debug, Error)]
pub enum WaveError {
    /// A spawn amount below zero was rejected.
    #[error("spawn amount {0} is negative")]
    InvalidAmount(i32),
    /// An edit named an enemy kind the session is not displaying.
    #[error("enemy kind '{0}' is not under edit in this session")]
    UnknownKind(String),
    /// The backing file could not be read or written.
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Spawn order and amount configured for one key tuple.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WaveEntry {
    /// Position of this enemy kind within the wave's spawn sequence.
    pub order: i32,
    /// Number of enemies of this kind to spawn.
    pub amount: i32,
}

impl WaveEntry {
    /// The default entry implied by an absent key.
    pub const ZERO: Self = Self {
        order: 0,
        amount: 0,
    };

    /// Creates an entry with explicit order and amount.
    #[must_use]
    pub const fn new(order: i32, amount: i32) -> Self {
        Self { order, amount }
    }
}

/// Serialized shape of one wave composition entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveRecord {
    /// Identifier of the placement node the entry belongs to.
    pub node_id: u32,
    /// Zero-based wave the entry configures.
    pub wave_index: u32,
    /// Enemy kind name being configured.
    pub enemy: String,
    /// Spawn order within the wave.
    pub order: i32,
    /// Spawn amount for the wave.
    pub amount: i32,
}

/// Keyed table of spawn order and amount per (node, wave, enemy kind).
#[derive(Debug, Default)]
pub struct WaveStore {
    waves: HashMap<(NodeId, u32), HashMap<String, WaveEntry>>,
}

impl WaveStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored entry for the key tuple, defaulting to
    /// [`WaveEntry::ZERO`] when the key was never configured.
    ///
    /// Lookups never fail; a zero entry and an absent entry are
    /// indistinguishable by contract.
    #[must_use]
    pub fn get_entry(&self, node: NodeId, wave: u32, enemy: &str) -> WaveEntry {
        self.waves
            .get(&(node, wave))
            .and_then(|composition| composition.get(enemy))
            .copied()
            .unwrap_or(WaveEntry::ZERO)
    }

    /// Inserts or overwrites the unique entry for the key tuple.
    ///
    /// A negative amount is rejected with [`WaveError::InvalidAmount`]
    /// and leaves the store unchanged.
    pub fn set_entry(
        &mut self,
        node: NodeId,
        wave: u32,
        enemy: &str,
        order: i32,
        amount: i32,
    ) -> Result<(), WaveError> {
        if amount < 0 {
            return Err(WaveError::InvalidAmount(amount));
        }
        let composition = self.waves.entry((node, wave)).or_default();
        let _ = composition.insert(enemy.to_owned(), WaveEntry::new(order, amount));
        Ok(())
    }

    /// Number of stored entries, counting zero entries that were
    /// explicitly written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.waves.values().map(HashMap::len).sum()
    }

    /// Reports whether no entries are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waves.values().all(HashMap::is_empty)
    }

    /// Composition of one wave at one node, sorted by enemy kind name.
    #[must_use]
    pub fn composition(&self, node: NodeId, wave: u32) -> Vec<(String, WaveEntry)> {
        let mut entries: Vec<_> = self
            .waves
            .get(&(node, wave))
            .into_iter()
            .flatten()
            .map(|(enemy, entry)| (enemy.clone(), *entry))
            .collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        entries
    }

    /// Flattens the table into records sorted by key.
    ///
    /// Entries equal to [`WaveEntry::ZERO`] are omitted: after a reload
    /// they are indistinguishable from absent keys, and dropping them
    /// keeps files minimal and deterministic.
    #[must_use]
    pub fn to_records(&self) -> Vec<WaveRecord> {
        let mut records: Vec<WaveRecord> = self
            .waves
            .iter()
            .flat_map(|((node, wave), composition)| {
                composition
                    .iter()
                    .filter(|(_, entry)| **entry != WaveEntry::ZERO)
                    .map(|(enemy, entry)| WaveRecord {
                        node_id: node.get(),
                        wave_index: *wave,
                        enemy: enemy.clone(),
                        order: entry.order,
                        amount: entry.amount,
                    })
            })
            .collect();
        records.sort_by(|a, b| {
            (a.node_id, a.wave_index, &a.enemy).cmp(&(b.node_id, b.wave_index, &b.enemy))
        });
        records
    }

    /// Rebuilds a store from flattened records.
    ///
    /// A record carrying a negative amount rejects the whole batch.
    pub fn from_records(records: Vec<WaveRecord>) -> Result<Self, WaveError> {
        let mut store = Self::new();
        for record in records {
            store.set_entry(
                NodeId::new(record.node_id),
                record.wave_index,
                &record.enemy,
                record.order,
                record.amount,
            )?;
        }
        Ok(store)
    }

    /// Persists the full table as a flat record list.
    pub fn save_to_file(&self, path: impl AsRef<std::path::Path>) -> Result<(), WaveError> {
        Ok(persistence::save_to_file(&self.to_records(), path)?)
    }

    /// Replaces this table with the contents of a persisted record list.
    ///
    /// The load is all-or-nothing: on any failure the previous table is
    /// left untouched.
    pub fn load_from_file(&mut self, path: impl AsRef<std::path::Path>) -> Result<(), WaveError> {
        let records: Vec<WaveRecord> = persistence::read_from_file(path)?;
        *self = Self::from_records(records)?;
        Ok(())
    }
}
