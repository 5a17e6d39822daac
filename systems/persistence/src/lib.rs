#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Generic type-driven persistence for level content.
//!
//! Two halves live here. The lower half is a format-agnostic file
//! round-trip: any serde-visible value can be written to and read back
//! from a JSON document on disk. The upper half flattens a heterogeneous
//! list of placed entities into [`PlacementRecord`] values and rebuilds
//! the list by resolving each recorded type name through the
//! [`PlaceableRegistry`]. Reconstruction is all-or-nothing: a single
//! unknown kind aborts the whole batch so a level never loads with
//! silently missing pieces.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tower_defence_core::PlacementRecord;
use tower_defence_registry::{Placeable, PlaceableRegistry};

/// Failures raised by the persistence layer.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The backing file could not be opened, created, or written.
    #[error("could not access '{path}'")]
    Io {
        /// File the operation was targeting.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file contents could not be encoded or decoded as JSON.
    #[error("could not parse '{path}'")]
    Format {
        /// File the operation was targeting.
        path: PathBuf,
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },
    /// A record referenced a kind the registry does not know.
    #[error("no placeable kind is registered under '{0}'")]
    UnknownType(String),
}

/// Writes any serializable value to `path` as a JSON document.
///
/// The write is exact with respect to [`read_from_file`]: reading the
/// file back yields a value equal to the one written.
pub fn save_to_file<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<(), PersistError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| PersistError::Io {
        path: path.to_owned(),
        source,
    })?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value).map_err(|source| PersistError::Format {
        path: path.to_owned(),
        source,
    })
}

/// Reads a JSON document previously written by [`save_to_file`].
pub fn read_from_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, PersistError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| PersistError::Io {
        path: path.to_owned(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| PersistError::Format {
        path: path.to_owned(),
        source,
    })
}

/// Flattens placed entities into their serialized records.
///
/// The mapping is one-to-one and order-preserving; placement order may
/// carry z-order meaning for the consumer.
#[must_use]
pub fn serialize_entities(entities: &[Box<dyn Placeable>]) -> Vec<PlacementRecord> {
    entities
        .iter()
        .map(|entity| PlacementRecord::new(entity.kind_name(), entity.position(), entity.scale()))
        .collect()
}

/// Rebuilds placed entities from their serialized records.
///
/// Each record's type name is resolved through the registry. Any
/// unregistered name fails the whole batch with
/// [`PersistError::UnknownType`] carrying the offending name; no
/// partially reconstructed list is returned.
pub fn deserialize_entities(
    records: &[PlacementRecord],
    registry: &PlaceableRegistry,
) -> Result<Vec<Box<dyn Placeable>>, PersistError> {
    records
        .iter()
        .map(|record| {
            registry
                .construct(&record.type_name, record.position(), record.scale)
                .map_err(|_| PersistError::UnknownType(record.type_name.clone()))
        })
        .collect()
}

/// Persists a committed entity list as a level file.
pub fn save_level(
    entities: &[Box<dyn Placeable>],
    path: impl AsRef<Path>,
) -> Result<(), PersistError> {
    let records = serialize_entities(entities);
    save_to_file(&records, path)
}

/// Materializes a level file into freshly constructed entities.
pub fn load_level(
    path: impl AsRef<Path>,
    registry: &PlaceableRegistry,
) -> Result<Vec<Box<dyn Placeable>>, PersistError> {
    let records: Vec<PlacementRecord> = read_from_file(path)?;
    deserialize_entities(&records, registry)
}

#[cfg(test)]
mod tests {
    use super::{deserialize_entities, serialize_entities, PersistError};
    use tower_defence_core::{PlacementRecord, Position};
    use tower_defence_registry::{Placeable, PlaceableRegistry};

    fn sample_entities(registry: &PlaceableRegistry) -> Vec<Box<dyn Placeable>> {
        vec![
            registry
                .construct("Tower.Archer", Position::new(10.0, 20.0), 1.0)
                .expect("archer registered"),
            registry
                .construct("Decoration.Tree", Position::new(30.0, 40.0), 0.5)
                .expect("tree registered"),
        ]
    }

    #[test]
    fn serialization_preserves_order_kind_position_and_scale() {
        let registry = PlaceableRegistry::with_standard_kinds();
        let records = serialize_entities(&sample_entities(&registry));

        assert_eq!(
            records,
            vec![
                PlacementRecord::new("Tower.Archer", Position::new(10.0, 20.0), 1.0),
                PlacementRecord::new("Decoration.Tree", Position::new(30.0, 40.0), 0.5),
            ]
        );
    }

    #[test]
    fn unknown_kind_aborts_the_whole_batch() {
        let registry = PlaceableRegistry::with_standard_kinds();
        let records = vec![
            PlacementRecord::new("Tower.Archer", Position::new(10.0, 20.0), 1.0),
            PlacementRecord::new("Tower.Ghost", Position::new(0.0, 0.0), 1.0),
        ];

        match deserialize_entities(&records, &registry) {
            Err(PersistError::UnknownType(name)) => assert_eq!(name, "Tower.Ghost"),
            other => panic!("expected UnknownType failure, got {other:?}"),
        }
    }
}
