#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for inspecting and validating level-editor files.
//!
//! Every subcommand is an explicit user command over local files; nothing
//! here mutates state automatically or in the background.

mod level_transfer;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tower_defence_core::{NodeId, PlacementRecord};
use tower_defence_path::WalkPath;
use tower_defence_persistence::{deserialize_entities, read_from_file};
use tower_defence_registry::{Placeable as _, PlaceableRegistry};
use tower_defence_waves::WaveStore;

#[derive(Parser)]
#[command(
    name = "tower-defence",
    about = "Inspect and validate tower-defence level-editor files"
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Load a walk-path file and print its traversal with segment lengths.
    Path {
        /// Walk-path file to load.
        file: PathBuf,
    },
    /// Load a level file against the standard registry and list its entities.
    Level {
        /// Level file to load.
        file: PathBuf,
    },
    /// Load an enemy-wave file and print one wave's composition at one node.
    Waves {
        /// Enemy-wave file to load.
        file: PathBuf,
        /// Placement node to inspect.
        #[arg(long)]
        node: u32,
        /// Wave index to inspect.
        #[arg(long)]
        wave: u32,
    },
    /// Encode a level file as a single-line transfer string.
    Export {
        /// Level file to encode.
        file: PathBuf,
    },
    /// Decode a transfer string and validate it against the registry.
    Import {
        /// Transfer string produced by `export`.
        line: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        CliCommand::Path { file } => show_path(&file),
        CliCommand::Level { file } => show_level(&file),
        CliCommand::Waves { file, node, wave } => show_waves(&file, node, wave),
        CliCommand::Export { file } => export_level(&file),
        CliCommand::Import { line } => import_level(&line),
    }
}

fn show_path(file: &PathBuf) -> Result<()> {
    let mut graph = WalkPath::new();
    graph
        .load_from_file(file)
        .with_context(|| format!("loading walk path from '{}'", file.display()))?;
    graph.compute_lengths();

    println!(
        "{} nodes, {} edges, {} start(s)",
        graph.node_count(),
        graph.edge_count(),
        graph.start_nodes().count()
    );
    for (node_id, predecessor) in graph.enumerate() {
        let node = graph
            .node(node_id)
            .expect("enumerated nodes are live by construction");
        let position = node.position();
        match predecessor {
            Some(from) => {
                let length = graph
                    .edge_length(from, node_id)
                    .expect("lengths were computed for every edge");
                println!(
                    "  node {} {:?} at ({}, {}) <- node {} (segment {length:.1})",
                    node_id.get(),
                    node.kind(),
                    position.x(),
                    position.y(),
                    from.get()
                );
            }
            None => println!(
                "  node {} {:?} at ({}, {}) [root]",
                node_id.get(),
                node.kind(),
                position.x(),
                position.y()
            ),
        }
    }
    Ok(())
}

fn show_level(file: &PathBuf) -> Result<()> {
    let registry = PlaceableRegistry::with_standard_kinds();
    let entities = tower_defence_persistence::load_level(file, &registry)
        .with_context(|| format!("loading level from '{}'", file.display()))?;

    println!("{} entities", entities.len());
    for entity in &entities {
        let position = entity.position();
        println!(
            "  {} at ({}, {}) scale {}",
            entity.kind_name(),
            position.x(),
            position.y(),
            entity.scale()
        );
    }
    Ok(())
}

fn show_waves(file: &PathBuf, node: u32, wave: u32) -> Result<()> {
    let mut store = WaveStore::new();
    store
        .load_from_file(file)
        .with_context(|| format!("loading waves from '{}'", file.display()))?;

    let node = NodeId::new(node);
    let composition = store.composition(node, wave);
    if composition.is_empty() {
        println!("node {} wave {wave}: no enemies configured", node.get());
        return Ok(());
    }

    println!("node {} wave {wave}:", node.get());
    for (enemy, entry) in composition {
        println!("  {enemy}: order {} amount {}", entry.order, entry.amount);
    }
    Ok(())
}

fn export_level(file: &PathBuf) -> Result<()> {
    let records: Vec<PlacementRecord> = read_from_file(file)
        .with_context(|| format!("loading level from '{}'", file.display()))?;
    println!("{}", level_transfer::encode(&records));
    Ok(())
}

fn import_level(line: &str) -> Result<()> {
    let records = level_transfer::decode(line).context("decoding transfer string")?;
    let registry = PlaceableRegistry::with_standard_kinds();
    let entities = deserialize_entities(&records, &registry)
        .context("validating transferred level against the registry")?;
    println!("transfer holds {} valid entities", entities.len());
    Ok(())
}
