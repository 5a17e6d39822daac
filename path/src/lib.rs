#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Directed walk-path graph that enemies follow through a level.
//!
//! [`WalkPath`] owns an insertion-ordered node arena and a directed edge
//! list. Editors build the graph incrementally, gameplay consumes it via
//! [`WalkPath::enumerate`], and the whole structure round-trips through a
//! JSON document of node and edge records. Removal follows a
//! queue-then-apply discipline: delete requests raised while the editor
//! iterates the graph are recorded and only drained at an explicit apply
//! point, never executed mid-iteration.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_defence_core::{NodeId, NodeKind, Position};
use tower_defence_persistence::{self as persistence, PersistError};

/// Failures raised while editing or loading a walk path.
#[derive(Debug, Error)]
pub enum GraphError {
    /// An edge endpoint does not name a live node in this graph.
    #[error("node {} is not part of this walk path", .0.get())]
    InvalidReference(NodeId),
    /// An edge would connect a node to itself.
    #[error("node {} cannot link to itself", .0.get())]
    SelfLoop(NodeId),
    /// A persisted walk path is malformed and was rejected whole.
    #[error("corrupt walk path: {0}")]
    Corrupt(String),
    /// The backing file could not be read or written.
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Vertex of the walk path, immutable in position once created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathNode {
    id: NodeId,
    position: Position,
    kind: NodeKind,
}

impl PathNode {
    /// Identifier assigned to the node by the owning graph.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// World position of the node.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Role the node plays within the path.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.kind
    }
}

#[derive(Clone, Copy, Debug)]
struct EdgeSlot {
    from: NodeId,
    to: NodeId,
    length: Option<f32>,
}

/// Serialized shape of a single node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Stable identifier preserved across save/load.
    pub id: u32,
    /// Horizontal world coordinate.
    pub x: f32,
    /// Vertical world coordinate.
    pub y: f32,
    /// Role of the node.
    pub kind: NodeKind,
}

/// Serialized shape of a single directed edge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Identifier of the edge's source node.
    pub from: u32,
    /// Identifier of the edge's destination node.
    pub to: u32,
}

/// On-disk document capturing a complete walk path.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WalkPathDocument {
    /// Nodes in declaration order.
    pub nodes: Vec<NodeRecord>,
    /// Directed edges between the declared nodes.
    pub edges: Vec<EdgeRecord>,
}

/// Directed path graph with typed endpoints and cached segment lengths.
#[derive(Debug, Default)]
pub struct WalkPath {
    nodes: Vec<PathNode>,
    edges: Vec<EdgeSlot>,
    next_id: u32,
    pending_removals: Vec<NodeId>,
}

impl WalkPath {
    /// Creates an empty walk path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates and registers a node, returning its identifier.
    ///
    /// Positions are not de-duplicated; two nodes may share coordinates.
    pub fn add_node(&mut self, position: Position, kind: NodeKind) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        self.nodes.push(PathNode { id, position, kind });
        id
    }

    /// Appends a directed edge from `from` to `to`.
    ///
    /// Fails with [`GraphError::InvalidReference`] if either endpoint is
    /// not a live node and [`GraphError::SelfLoop`] if both endpoints
    /// name the same node. Multiple children per node are allowed, so
    /// branching paths are representable.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> Result<(), GraphError> {
        if from == to {
            return Err(GraphError::SelfLoop(from));
        }
        if !self.contains(from) {
            return Err(GraphError::InvalidReference(from));
        }
        if !self.contains(to) {
            return Err(GraphError::InvalidReference(to));
        }
        self.edges.push(EdgeSlot {
            from,
            to,
            length: None,
        });
        Ok(())
    }

    /// Designates a node as a traversal root.
    ///
    /// The designation is stored as the node's kind, so it survives
    /// persistence without a side table. Zero or more start nodes are
    /// legal; enumeration walks from every one of them.
    pub fn mark_start(&mut self, node: NodeId) -> Result<(), GraphError> {
        let node = self
            .nodes
            .iter_mut()
            .find(|candidate| candidate.id == node)
            .ok_or(GraphError::InvalidReference(node))?;
        node.kind = NodeKind::Start;
        Ok(())
    }

    /// Recomputes the cached Euclidean length of every edge, O(E).
    ///
    /// Must be invoked once after a load before any consumer reads
    /// segment lengths.
    pub fn compute_lengths(&mut self) {
        let positions: HashMap<NodeId, Position> = self
            .nodes
            .iter()
            .map(|node| (node.id, node.position))
            .collect();
        for edge in &mut self.edges {
            // Endpoints are guaranteed live; removal drops incident edges.
            if let (Some(from), Some(to)) = (positions.get(&edge.from), positions.get(&edge.to)) {
                edge.length = Some(from.distance_to(*to));
            }
        }
    }

    /// Cached length of the edge `from -> to`.
    ///
    /// Returns `None` when no such edge exists or its length has not
    /// been computed since the last topology change that created it.
    #[must_use]
    pub fn edge_length(&self, from: NodeId, to: NodeId) -> Option<f32> {
        self.edges
            .iter()
            .find(|edge| edge.from == from && edge.to == to)
            .and_then(|edge| edge.length)
    }

    /// Reports whether the provided identifier names a live node.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.iter().any(|candidate| candidate.id == node)
    }

    /// Looks up a live node by identifier.
    #[must_use]
    pub fn node(&self, node: NodeId) -> Option<&PathNode> {
        self.nodes.iter().find(|candidate| candidate.id == node)
    }

    /// Iterates the nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &PathNode> {
        self.nodes.iter()
    }

    /// Number of live nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterates the children of a node in edge insertion order.
    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.edges
            .iter()
            .filter(move |edge| edge.from == node)
            .map(|edge| edge.to)
    }

    /// Iterates the identifiers of all start nodes in insertion order.
    pub fn start_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|node| node.kind == NodeKind::Start)
            .map(|node| node.id)
    }

    /// Walks the graph breadth-first from every start node.
    ///
    /// Each reachable node is yielded exactly once together with its
    /// predecessor (`None` for roots), and a predecessor always appears
    /// strictly before the nodes it leads to. Consumers rebuilding
    /// visual links rely on that ordering to resolve the predecessor's
    /// handle before the current node arrives.
    #[must_use]
    pub fn enumerate(&self) -> Enumerate<'_> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        for root in self.start_nodes() {
            if visited.insert(root) {
                queue.push_back((root, None));
            }
        }
        Enumerate {
            graph: self,
            queue,
            visited,
        }
    }

    /// Records a removal request without touching the live collections.
    ///
    /// Requests are drained by [`WalkPath::apply_removals`]; requests
    /// naming nodes that are already gone are ignored at apply time.
    pub fn request_removal(&mut self, node: NodeId) {
        self.pending_removals.push(node);
    }

    /// Applies all queued removal requests.
    ///
    /// Removes each requested node and every edge incident to it. This
    /// is the designated apply point of the queue-then-apply discipline,
    /// typically the start of the next editor update step.
    pub fn apply_removals(&mut self) {
        if self.pending_removals.is_empty() {
            return;
        }
        let doomed: HashSet<NodeId> = self.pending_removals.drain(..).collect();
        self.nodes.retain(|node| !doomed.contains(&node.id));
        self.edges
            .retain(|edge| !doomed.contains(&edge.from) && !doomed.contains(&edge.to));
    }

    /// Captures the graph as its on-disk document shape.
    #[must_use]
    pub fn to_document(&self) -> WalkPathDocument {
        WalkPathDocument {
            nodes: self
                .nodes
                .iter()
                .map(|node| NodeRecord {
                    id: node.id.get(),
                    x: node.position.x(),
                    y: node.position.y(),
                    kind: node.kind,
                })
                .collect(),
            edges: self
                .edges
                .iter()
                .map(|edge| EdgeRecord {
                    from: edge.from.get(),
                    to: edge.to.get(),
                })
                .collect(),
        }
    }

    /// Reconstructs a graph from its on-disk document shape.
    ///
    /// The document is validated as a whole: duplicate node ids, a node
    /// id at the top of the id space, edges naming absent nodes, and
    /// self-loop edges all reject the document with
    /// [`GraphError::Corrupt`] rather than producing a partially built
    /// graph. Edge lengths start uncomputed.
    pub fn from_document(document: WalkPathDocument) -> Result<Self, GraphError> {
        let mut seen = HashSet::new();
        let mut next_id = 0;
        let mut nodes = Vec::with_capacity(document.nodes.len());
        for record in &document.nodes {
            if !seen.insert(record.id) {
                return Err(GraphError::Corrupt(format!(
                    "node id {} declared twice",
                    record.id
                )));
            }
            // A node at u32::MAX would leave no room to mint fresh ids.
            let successor = record.id.checked_add(1).ok_or_else(|| {
                GraphError::Corrupt(format!("node id {} exhausts the id space", record.id))
            })?;
            next_id = next_id.max(successor);
            nodes.push(PathNode {
                id: NodeId::new(record.id),
                position: Position::new(record.x, record.y),
                kind: record.kind,
            });
        }

        let mut edges = Vec::with_capacity(document.edges.len());
        for record in &document.edges {
            if record.from == record.to {
                return Err(GraphError::Corrupt(format!(
                    "edge loops node {} back onto itself",
                    record.from
                )));
            }
            for endpoint in [record.from, record.to] {
                if !seen.contains(&endpoint) {
                    return Err(GraphError::Corrupt(format!(
                        "edge {} -> {} references undeclared node {}",
                        record.from, record.to, endpoint
                    )));
                }
            }
            edges.push(EdgeSlot {
                from: NodeId::new(record.from),
                to: NodeId::new(record.to),
                length: None,
            });
        }

        Ok(Self {
            nodes,
            edges,
            next_id,
            pending_removals: Vec::new(),
        })
    }

    /// Persists the full graph as a JSON document.
    pub fn save_to_file(&self, path: impl AsRef<std::path::Path>) -> Result<(), GraphError> {
        Ok(persistence::save_to_file(&self.to_document(), path)?)
    }

    /// Replaces this graph with the contents of a persisted document.
    ///
    /// The load is all-or-nothing: on any failure the previous in-memory
    /// graph is left untouched.
    pub fn load_from_file(&mut self, path: impl AsRef<std::path::Path>) -> Result<(), GraphError> {
        let document: WalkPathDocument = persistence::read_from_file(path)?;
        *self = Self::from_document(document)?;
        Ok(())
    }
}

/// Lazy breadth-first traversal over a [`WalkPath`].
///
/// Created by [`WalkPath::enumerate`].
#[derive(Debug)]
pub struct Enumerate<'a> {
    graph: &'a WalkPath,
    queue: VecDeque<(NodeId, Option<NodeId>)>,
    visited: HashSet<NodeId>,
}

impl Iterator for Enumerate<'_> {
    type Item = (NodeId, Option<NodeId>);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, predecessor) = self.queue.pop_front()?;
        for child in self.graph.children(node) {
            if self.visited.insert(child) {
                self.queue.push_back((child, Some(node)));
            }
        }
        Some((node, predecessor))
    }
}

#[cfg(test)]
mod tests {
    use super::{GraphError, WalkPath, WalkPathDocument};
    use tower_defence_core::{NodeKind, Position};

    #[test]
    fn duplicate_node_ids_reject_the_document() {
        let mut graph = WalkPath::new();
        let _ = graph.add_node(Position::new(0.0, 0.0), NodeKind::Start);
        let mut document = graph.to_document();
        document.nodes.push(document.nodes[0]);

        match WalkPath::from_document(document) {
            Err(GraphError::Corrupt(_)) => {}
            other => panic!("expected Corrupt rejection, got {other:?}"),
        }
    }

    #[test]
    fn dangling_edge_rejects_the_document() {
        let document = WalkPathDocument {
            nodes: vec![],
            edges: vec![super::EdgeRecord { from: 0, to: 1 }],
        };

        match WalkPath::from_document(document) {
            Err(GraphError::Corrupt(_)) => {}
            other => panic!("expected Corrupt rejection, got {other:?}"),
        }
    }

    #[test]
    fn node_id_at_the_top_of_the_id_space_rejects_the_document() {
        let document = WalkPathDocument {
            nodes: vec![super::NodeRecord {
                id: u32::MAX,
                x: 0.0,
                y: 0.0,
                kind: NodeKind::Start,
            }],
            edges: vec![],
        };

        match WalkPath::from_document(document) {
            Err(GraphError::Corrupt(_)) => {}
            other => panic!("expected Corrupt rejection, got {other:?}"),
        }
    }

    #[test]
    fn next_id_resumes_after_the_highest_loaded_id() {
        let mut graph = WalkPath::new();
        let _ = graph.add_node(Position::new(0.0, 0.0), NodeKind::Start);
        let _ = graph.add_node(Position::new(1.0, 0.0), NodeKind::End);

        let mut restored =
            WalkPath::from_document(graph.to_document()).expect("document is valid");
        let fresh = restored.add_node(Position::new(2.0, 0.0), NodeKind::Regular);
        assert_eq!(fresh.get(), 2);
    }
}
