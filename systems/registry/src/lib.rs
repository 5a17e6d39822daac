#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Explicit registry of placeable entity kinds.
//!
//! Rather than discovering placeable types through runtime reflection,
//! every kind is listed once in an explicit registration table, in a
//! statically auditable order, together with a factory that builds a
//! fresh entity from a position and uniform scale. Editors enumerate
//! kinds to populate palettes, and the persistence layer resolves
//! recorded type names back into live entities through
//! [`PlaceableRegistry::construct`].

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;
use tower_defence_core::Position;

pub mod kinds;

/// Capability tags describing what a placeable kind can be used for.
///
/// A kind may carry several tags; editors filter on them when building
/// their palettes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Kind can anchor or act as a tower.
    Tower,
    /// Kind is decorative scenery.
    Decoration,
    /// Kind is a tile composing the visible walk path.
    PathTile,
    /// Kind is an enemy eligible for wave composition.
    Enemy,
}

/// Entity that can be positioned, scaled, and persisted by kind name.
pub trait Placeable: fmt::Debug {
    /// Stable, registry-resolvable name identifying this entity's kind.
    fn kind_name(&self) -> &'static str;

    /// Current world position of the entity.
    fn position(&self) -> Position;

    /// Moves the entity to a new world position.
    fn set_position(&mut self, position: Position);

    /// Uniform scale applied to the entity.
    fn scale(&self) -> f32;

    /// Applies a new uniform scale to the entity.
    fn set_scale(&mut self, scale: f32);

    /// Produces an independently owned copy of the entity.
    ///
    /// Editors clone the palette item into an in-hand preview before
    /// committing a placement; the preview is never persisted.
    fn clone_boxed(&self) -> Box<dyn Placeable>;
}

impl Clone for Box<dyn Placeable> {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

/// Constructor invoked by the registry to build a fresh entity.
pub type PlaceableFactory = fn(Position, f32) -> Box<dyn Placeable>;

/// Failures raised while registering or resolving placeable kinds.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The requested kind name has no registered entry.
    #[error("no placeable kind is registered under '{0}'")]
    UnknownType(String),
    /// A kind with the same name was already registered.
    #[error("placeable kind '{0}' is already registered")]
    DuplicateKind(String),
}

struct KindDescriptor {
    name: &'static str,
    capabilities: &'static [Capability],
    factory: PlaceableFactory,
}

/// Process-wide table mapping stable kind names to entity factories.
#[derive(Default)]
pub struct PlaceableRegistry {
    entries: Vec<KindDescriptor>,
    index: HashMap<&'static str, usize>,
}

impl PlaceableRegistry {
    /// Creates an empty registry with no kinds registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry pre-populated with every built-in kind.
    ///
    /// This is the explicit registration list that replaces assembly
    /// scanning; the order below fixes palette order across runs.
    #[must_use]
    pub fn with_standard_kinds() -> Self {
        let mut registry = Self::new();
        for (name, capabilities, factory) in kinds::standard_kinds() {
            registry
                .register(name, capabilities, factory)
                .expect("built-in kind names are unique");
        }
        registry
    }

    /// Associates a stable name with a construction factory.
    ///
    /// Registration order is preserved and drives the enumeration order
    /// of [`PlaceableRegistry::kinds`]. Registering the same name twice
    /// fails with [`RegistryError::DuplicateKind`].
    pub fn register(
        &mut self,
        name: &'static str,
        capabilities: &'static [Capability],
        factory: PlaceableFactory,
    ) -> Result<(), RegistryError> {
        if self.index.contains_key(name) {
            return Err(RegistryError::DuplicateKind(name.to_owned()));
        }
        let slot = self.entries.len();
        self.entries.push(KindDescriptor {
            name,
            capabilities,
            factory,
        });
        let _ = self.index.insert(name, slot);
        Ok(())
    }

    /// Constructs a freshly owned entity of the named kind.
    ///
    /// Fails with [`RegistryError::UnknownType`] when the name has no
    /// registered entry; unresolvable names are a hard failure rather
    /// than a null result.
    pub fn construct(
        &self,
        name: &str,
        position: Position,
        scale: f32,
    ) -> Result<Box<dyn Placeable>, RegistryError> {
        let slot = self
            .index
            .get(name)
            .ok_or_else(|| RegistryError::UnknownType(name.to_owned()))?;
        let descriptor = &self.entries[*slot];
        Ok((descriptor.factory)(position, scale))
    }

    /// Reports whether a kind with the provided name is registered.
    #[must_use]
    pub fn contains_kind(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Enumerates registered kind names whose capability tags intersect
    /// the requested set, in registration order.
    ///
    /// An empty filter matches every registered kind.
    pub fn kinds<'a>(
        &'a self,
        filter: &'a [Capability],
    ) -> impl Iterator<Item = &'static str> + 'a {
        self.entries
            .iter()
            .filter(move |entry| {
                filter.is_empty()
                    || entry
                        .capabilities
                        .iter()
                        .any(|capability| filter.contains(capability))
            })
            .map(|entry| entry.name)
    }
}

#[cfg(test)]
mod tests {
    use super::kinds;
    use super::{Capability, PlaceableRegistry, RegistryError};
    use tower_defence_core::Position;

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = PlaceableRegistry::new();
        registry
            .register("Tower.Plot", &[Capability::Tower], kinds::tower_plot)
            .expect("first registration succeeds");
        let error = registry
            .register("Tower.Plot", &[Capability::Tower], kinds::tower_plot)
            .expect_err("second registration fails");
        assert_eq!(error, RegistryError::DuplicateKind("Tower.Plot".into()));
    }

    #[test]
    fn unknown_kind_is_a_hard_failure() {
        let registry = PlaceableRegistry::with_standard_kinds();
        let error = registry
            .construct("Tower.Ghost", Position::new(0.0, 0.0), 1.0)
            .expect_err("unregistered kind must not construct");
        assert_eq!(error, RegistryError::UnknownType("Tower.Ghost".into()));
    }

    #[test]
    fn empty_filter_enumerates_all_kinds_in_registration_order() {
        let registry = PlaceableRegistry::with_standard_kinds();
        let names: Vec<_> = registry.kinds(&[]).collect();
        let expected: Vec<_> = kinds::standard_kinds()
            .iter()
            .map(|(name, _, _)| *name)
            .collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn capability_filter_selects_intersecting_kinds() {
        let registry = PlaceableRegistry::with_standard_kinds();
        let enemies: Vec<_> = registry.kinds(&[Capability::Enemy]).collect();
        assert_eq!(enemies, vec!["Enemy.BasicOrk"]);
    }
}
