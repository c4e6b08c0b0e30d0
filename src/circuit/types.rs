//! Core types for netlist representation.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Canonical label of the 5-volt rail.
pub const RAIL_5V: &str = "5v";

/// User-facing alias rewritten to [`RAIL_5V`].
pub const VCC_ALIAS: &str = "vcc";

/// A physical contact on the breadboard: a numeric pin, a named rail, or any alias.
///
/// Labels are non-empty ASCII alphanumeric tokens, stored lowercased, with the
/// `vcc` alias already resolved. Two labels are equal iff their normalized text is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(String);

impl Label {
    /// Normalize and validate a label token.
    ///
    /// Returns `None` if the token is empty or contains anything other than
    /// ASCII letters and digits.
    pub fn parse(text: &str) -> Option<Self> {
        if text.is_empty() || !text.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }
        let lower = text.to_ascii_lowercase();
        if lower == VCC_ALIAS {
            Some(Self(RAIL_5V.to_string()))
        } else {
            Some(Self(lower))
        }
    }

    /// Label of a numbered pin.
    pub fn pin(number: u32) -> Self {
        Self(number.to_string())
    }

    /// The normalized label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An undirected bridge between two distinct labels.
///
/// Endpoints are kept in sorted order so `{a,b}` and `{b,a}` compare, hash
/// and render identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    low: Label,
    high: Label,
}

impl Edge {
    /// Create an edge. Returns `None` for a self-edge.
    pub fn new(a: Label, b: Label) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Some(Self { low: b, high: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Parse the `label-label` wire/storage form.
    pub fn parse(text: &str) -> Option<Self> {
        let (a, b) = text.trim().split_once('-')?;
        Self::new(Label::parse(a.trim())?, Label::parse(b.trim())?)
    }

    /// The endpoint opposite to `label`, if `label` is an endpoint.
    pub fn other(&self, label: &Label) -> Option<&Label> {
        if &self.low == label {
            Some(&self.high)
        } else if &self.high == label {
            Some(&self.low)
        } else {
            None
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

// Edges persist in their `label-label` wire form.
impl Serialize for Edge {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Edge {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Edge::parse(&text)
            .ok_or_else(|| de::Error::custom(format!("invalid bridge '{}'", text)))
    }
}

/// A single pending change to the netlist, produced by directive parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Add a bridge (idempotent)
    Connect(Edge),
    /// Remove a node, reconnecting its former neighbors
    Disconnect(Label),
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edit::Connect(edge) => write!(f, "{}", edge),
            Edit::Disconnect(label) => write!(f, "-{}", label),
        }
    }
}
