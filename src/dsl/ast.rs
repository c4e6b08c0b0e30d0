//! Classified directive types.

use crate::circuit::{Edge, Edit, Label};
use crate::error::{BridgeError, Result};

use super::expand::{expand_chain, expand_incremented};

/// Placeholder target in an incremented series that consumes a pin without a bridge.
pub const SKIP_TOKEN: &str = "x";

/// One directive, classified into one of the four grammars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `-A`: disconnect A, reconnecting its neighbors
    Remove(Label),
    /// `A-B`: bridge A and B
    Connect(Label, Label),
    /// `N++(T1,T2,...)`: bridge pin N to T1, N+1 to T2, ...
    Increment { start: u32, targets: Vec<Target> },
    /// `A-B-C-...`: bridge every adjacent pair
    Chain(Vec<Label>),
}

/// A target in an incremented series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Bridge the current pin to this label
    Label(Label),
    /// Skip the current pin
    Skip,
}

impl Directive {
    /// Expand this directive into pending netlist edits.
    ///
    /// `source` is the directive text, used for error reporting.
    pub fn edits(&self, source: &str) -> Result<Vec<Edit>> {
        let pairs = match self {
            Directive::Remove(label) => return Ok(vec![Edit::Disconnect(label.clone())]),
            Directive::Connect(a, b) => vec![(a.clone(), b.clone())],
            Directive::Increment { start, targets } => {
                let pairs = expand_incremented(*start, targets);
                if pairs.is_empty() {
                    return Err(BridgeError::empty_expansion(source));
                }
                pairs
            }
            Directive::Chain(labels) => expand_chain(labels),
        };

        pairs
            .into_iter()
            .map(|(a, b)| {
                let label = a.to_string();
                Edge::new(a, b)
                    .map(Edit::Connect)
                    .ok_or_else(|| BridgeError::self_connection(source, label))
            })
            .collect()
    }
}
