#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tower Defence level editor.
//!
//! This crate defines the vocabulary types that connect the walk-path
//! graph, the placeable-kind registry, the persistence layer, and the
//! wave composition store. Everything that crosses a crate boundary or
//! lands in a level file is declared here so that the wire format is
//! auditable in one place.

use serde::{Deserialize, Serialize};

/// Unique identifier assigned to a walk-path node.
///
/// Identifiers are allocated monotonically by the graph and preserved
/// across save/load, so wave entries keyed by node id remain valid after
/// a level is reloaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a new node identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Role a node plays within the walk path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Traversal root where enemy movement originates.
    Start,
    /// Terminal node where enemy movement ends.
    End,
    /// Intermediate node passed through on the way to an end node.
    Regular,
}

/// 2-D world position expressed in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    x: f32,
    y: f32,
}

impl Position {
    /// Creates a new position from explicit coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate of the position.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate of the position.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Computes the Euclidean distance between two positions.
    #[must_use]
    pub fn distance_to(self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx.hypot(dy)
    }
}

/// Serialized shape of a placed entity.
///
/// The level file is a JSON array of these records; the same shape is
/// reused by every type-driven collection that persists entities by
/// kind name. Field names are part of the on-disk contract.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    /// Registry-resolvable name identifying the entity's kind.
    pub type_name: String,
    /// Horizontal world coordinate of the placement.
    pub x: f32,
    /// Vertical world coordinate of the placement.
    pub y: f32,
    /// Uniform scale applied to the entity.
    pub scale: f32,
}

impl PlacementRecord {
    /// Creates a new placement record from a kind name, position and scale.
    #[must_use]
    pub fn new(type_name: impl Into<String>, position: Position, scale: f32) -> Self {
        Self {
            type_name: type_name.into(),
            x: position.x(),
            y: position.y(),
            scale,
        }
    }

    /// Position captured by the record.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::{NodeId, NodeKind, PlacementRecord, Position};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn node_id_round_trips_through_bincode() {
        assert_round_trip(&NodeId::new(7));
    }

    #[test]
    fn node_kind_round_trips_through_bincode() {
        assert_round_trip(&NodeKind::Start);
        assert_round_trip(&NodeKind::End);
        assert_round_trip(&NodeKind::Regular);
    }

    #[test]
    fn position_round_trips_through_bincode() {
        assert_round_trip(&Position::new(12.5, -3.0));
    }

    #[test]
    fn placement_record_round_trips_through_bincode() {
        let record = PlacementRecord::new("Tower.Archer", Position::new(10.0, 20.0), 1.0);
        assert_round_trip(&record);
    }

    #[test]
    fn distance_matches_euclidean_expectation() {
        let origin = Position::new(0.0, 0.0);
        let target = Position::new(3.0, 4.0);
        assert!((origin.distance_to(target) - 5.0).abs() < f32::EPSILON);
        assert!((target.distance_to(origin) - 5.0).abs() < f32::EPSILON);
    }
}
