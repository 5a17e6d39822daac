//! Commit-on-navigate editing session for the wave composition grid.
//!
//! The editor surface batches all per-kind edits for the wave currently
//! on screen. Edits only become durable when the user navigates away
//! from the wave (or closes the editor), at which point every field for
//! the wave being left is written back in one pass and the fields for
//! the newly selected wave are loaded. A session that is dropped without
//! closing discards its in-progress edits; that behavior is part of the
//! contract.

use tower_defence_core::NodeId;
use tower_defence_registry::{Capability, PlaceableRegistry};

use crate::{WaveEntry, WaveError, WaveStore};

/// In-memory editing state for one placement node's wave grid.
#[derive(Debug)]
pub struct WaveEditorSession {
    node: NodeId,
    wave: u32,
    fields: Vec<(String, WaveEntry)>,
}

impl WaveEditorSession {
    /// Opens a session for the provided placement node, showing wave 0.
    ///
    /// One edit field is created per registered enemy kind, in
    /// registration order, pre-filled from the store.
    #[must_use]
    pub fn open(store: &WaveStore, registry: &PlaceableRegistry, node: NodeId) -> Self {
        let mut session = Self {
            node,
            wave: 0,
            fields: registry
                .kinds(&[Capability::Enemy])
                .map(|kind| (kind.to_owned(), WaveEntry::ZERO))
                .collect(),
        };
        session.load_fields(store);
        session
    }

    /// Placement node this session edits.
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// Wave currently displayed by the session.
    #[must_use]
    pub const fn wave(&self) -> u32 {
        self.wave
    }

    /// Iterates the displayed fields in registration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, WaveEntry)> {
        self.fields
            .iter()
            .map(|(kind, entry)| (kind.as_str(), *entry))
    }

    /// Current field value for one enemy kind, if it is under edit.
    #[must_use]
    pub fn field(&self, kind: &str) -> Option<WaveEntry> {
        self.fields
            .iter()
            .find(|(candidate, _)| candidate == kind)
            .map(|(_, entry)| *entry)
    }

    /// Updates the in-memory field for one enemy kind.
    ///
    /// The edit is not durable until the session navigates to another
    /// wave or closes. Negative amounts are rejected immediately so a
    /// later commit can never partially fail.
    pub fn edit(&mut self, kind: &str, order: i32, amount: i32) -> Result<(), WaveError> {
        if amount < 0 {
            return Err(WaveError::InvalidAmount(amount));
        }
        let field = self
            .fields
            .iter_mut()
            .find(|(candidate, _)| candidate == kind)
            .ok_or_else(|| WaveError::UnknownKind(kind.to_owned()))?;
        field.1 = WaveEntry::new(order, amount);
        Ok(())
    }

    /// Navigates to another wave, committing the wave being left.
    ///
    /// Every field for the previous wave is written through
    /// [`WaveStore::set_entry`], then the fields reload from the newly
    /// selected wave.
    pub fn select_wave(&mut self, store: &mut WaveStore, wave: u32) -> Result<(), WaveError> {
        self.commit(store)?;
        self.wave = wave;
        self.load_fields(store);
        Ok(())
    }

    /// Closes the session, committing the currently displayed wave.
    pub fn close(self, store: &mut WaveStore) -> Result<(), WaveError> {
        self.commit(store)
    }

    fn commit(&self, store: &mut WaveStore) -> Result<(), WaveError> {
        for (kind, entry) in &self.fields {
            store.set_entry(self.node, self.wave, kind, entry.order, entry.amount)?;
        }
        Ok(())
    }

    fn load_fields(&mut self, store: &WaveStore) {
        for (kind, entry) in &mut self.fields {
            *entry = store.get_entry(self.node, self.wave, kind);
        }
    }
}
