use tower_defence_core::{PlacementRecord, Position};
use tower_defence_persistence::{
    deserialize_entities, load_level, read_from_file, save_level, save_to_file,
    serialize_entities, PersistError,
};
use tower_defence_registry::{Placeable as _, PlaceableRegistry};

#[test]
fn entity_round_trip_preserves_kinds_positions_and_scales() {
    let registry = PlaceableRegistry::with_standard_kinds();
    let entities = vec![
        registry
            .construct("Tower.Archer", Position::new(10.0, 20.0), 1.0)
            .expect("archer registered"),
        registry
            .construct("Decoration.Tree", Position::new(30.0, 40.0), 0.5)
            .expect("tree registered"),
    ];

    let records = serialize_entities(&entities);
    let restored = deserialize_entities(&records, &registry).expect("all kinds resolve");

    assert_eq!(restored.len(), entities.len());
    for (restored, original) in restored.iter().zip(entities.iter()) {
        assert_eq!(restored.kind_name(), original.kind_name());
        assert_eq!(restored.position(), original.position());
        assert_eq!(restored.scale(), original.scale());
    }
}

#[test]
fn record_file_round_trip_is_exact() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("level_editor.json");

    let records = vec![
        PlacementRecord::new("Tower.Archer", Position::new(10.0, 20.0), 1.0),
        PlacementRecord::new("Path.LD", Position::new(55.0, 5.0), 2.0),
        PlacementRecord::new("Decoration.Tree", Position::new(30.0, 40.0), 0.5),
    ];

    save_to_file(&records, &path).expect("records save");
    let restored: Vec<PlacementRecord> = read_from_file(&path).expect("records load");
    assert_eq!(restored, records);
}

#[test]
fn level_file_materializes_into_constructed_entities() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("level_editor.json");
    let registry = PlaceableRegistry::with_standard_kinds();

    let entities = vec![
        registry
            .construct("Tower.Plot", Position::new(120.0, 80.0), 1.5)
            .expect("plot registered"),
        registry
            .construct("Enemy.BasicOrk", Position::new(0.0, 0.0), 1.0)
            .expect("ork registered"),
    ];

    save_level(&entities, &path).expect("level saves");
    let loaded = load_level(&path, &registry).expect("level loads");

    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].kind_name(), "Tower.Plot");
    assert_eq!(loaded[0].position(), Position::new(120.0, 80.0));
    assert_eq!(loaded[0].scale(), 1.5);
    assert_eq!(loaded[1].kind_name(), "Enemy.BasicOrk");
}

#[test]
fn level_with_unknown_kind_loads_no_entities() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("level_editor.json");
    let registry = PlaceableRegistry::with_standard_kinds();

    let records = vec![
        PlacementRecord::new("Tower.Archer", Position::new(10.0, 20.0), 1.0),
        PlacementRecord::new("Tower.Ghost", Position::new(1.0, 2.0), 1.0),
    ];
    save_to_file(&records, &path).expect("records save");

    match load_level(&path, &registry) {
        Err(PersistError::UnknownType(name)) => assert_eq!(name, "Tower.Ghost"),
        other => panic!("expected UnknownType failure, got {other:?}"),
    }
}

#[test]
fn missing_file_reports_the_offending_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.json");

    let error = read_from_file::<Vec<PlacementRecord>>(&path).expect_err("file is absent");
    match error {
        PersistError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected Io failure, got {other:?}"),
    }
}
