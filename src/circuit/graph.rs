//! Netlist graph structure.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{Edge, Edit, Label};
use crate::dsl::expand_chain;

/// The full set of intended bridges on the breadboard.
///
/// Edges are kept in a sorted set: duplicates collapse and iteration order is
/// stable, which keeps the encoded device command deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Netlist {
    edges: BTreeSet<Edge>,
}

impl Netlist {
    /// Create an empty netlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a netlist from a collection of edges.
    pub fn from_edges(edges: impl IntoIterator<Item = Edge>) -> Self {
        Self {
            edges: edges.into_iter().collect(),
        }
    }

    /// Add a bridge. Returns `false` if it was already present.
    pub fn connect(&mut self, edge: Edge) -> bool {
        self.edges.insert(edge)
    }

    /// Remove a node and every bridge touching it.
    ///
    /// The node's former neighbors are chained back together in label order,
    /// so anything that was joined through the node stays joined: removing `x`
    /// from `a-x, x-b` leaves `a-b`. A leaf or isolated node leaves nothing
    /// behind. Returns the bridges that were added; a chain link that already
    /// existed is not reported.
    pub fn disconnect(&mut self, label: &Label) -> Vec<Edge> {
        let mut neighbors = BTreeSet::new();
        self.edges.retain(|edge| match edge.other(label) {
            Some(other) => {
                neighbors.insert(other.clone());
                false
            }
            None => true,
        });

        let neighbors: Vec<Label> = neighbors.into_iter().collect();
        let added: Vec<Edge> = expand_chain(&neighbors)
            .into_iter()
            .filter_map(|(a, b)| Edge::new(a, b))
            .filter(|edge| self.edges.insert(edge.clone()))
            .collect();

        debug!(
            node = %label,
            neighbors = neighbors.len(),
            reconnected = added.len(),
            "disconnected node"
        );

        added
    }

    /// Apply a pending edit.
    pub fn apply(&mut self, edit: Edit) {
        match edit {
            Edit::Connect(edge) => {
                self.connect(edge);
            }
            Edit::Disconnect(label) => {
                self.disconnect(&label);
            }
        }
    }

    /// Apply a batch of edits in order.
    pub fn apply_all(&mut self, edits: impl IntoIterator<Item = Edit>) {
        for edit in edits {
            self.apply(edit);
        }
    }

    /// Replace the whole edge set.
    pub fn replace(&mut self, other: Netlist) {
        *self = other;
    }

    /// Remove every bridge.
    pub fn clear(&mut self) {
        self.edges.clear();
    }

    /// Check whether a bridge exists between two labels.
    pub fn contains(&self, a: &Label, b: &Label) -> bool {
        match Edge::new(a.clone(), b.clone()) {
            Some(edge) => self.edges.contains(&edge),
            None => false,
        }
    }

    /// Labels directly bridged to the given label, in sorted order.
    pub fn neighbors(&self, label: &Label) -> Vec<&Label> {
        let set: BTreeSet<&Label> = self.edges.iter().filter_map(|e| e.other(label)).collect();
        set.into_iter().collect()
    }

    /// Iterate over bridges in sorted order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Number of bridges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Check if there are no bridges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
