//! Netlist graph representation.
//!
//! This module provides the in-memory representation of the bridges on the
//! breadboard. The [`Netlist`] struct holds the set of undirected [`Edge`]s
//! between [`Label`]s and applies the [`Edit`]s produced by the directive
//! parser.

mod graph;
mod types;

pub use graph::Netlist;
pub use types::*;
