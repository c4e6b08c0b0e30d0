//! Directive language for editing the bridge netlist.
//!
//! One input line holds one or more directives separated by commas. Each
//! directive is classified into one of four grammars and expanded into
//! netlist [`Edit`]s.
//!
//! # Grammar Overview
//!
//! ```text
//! line        = [ directive { ',' directive } ]
//! directive   = removal | direct | increment | chain
//! removal     = '-' label
//! direct      = label '-' label
//! increment   = pin '++' '(' target { ',' target } ')'
//! chain       = label '-' label '-' label { '-' label }
//!
//! target      = label | 'x'
//! pin         = digit+
//! label       = (letter | digit)+
//! ```
//!
//! Labels are case-insensitive and `vcc` is an alias for the `5v` rail.
//! Whitespace is allowed around the commas of a line and of an increment
//! target list, nowhere else.
//!
//! # Example
//!
//! ```text
//! 5-30,-20,20-40      connect 5-30, disconnect 20, connect 20-40
//! VCC-1-2-3-4         5v-1, 1-2, 2-3, 3-4
//! 1++(10,20,x,40)     1-10, 2-20, 4-40 (pin 3 skipped)
//! ```

mod ast;
mod expand;
mod parser;
mod splitter;

pub use ast::*;
pub use expand::{expand_chain, expand_incremented};
pub use parser::classify;
pub use splitter::split_directives;

use tracing::trace;

use crate::circuit::Edit;
use crate::error::{BridgeError, Result};

/// Parse a whole line into the pending edits it describes, in order.
///
/// Every directive is checked. If any fails, the result is a
/// [`BridgeError::InvalidLine`] carrying all failures and no edits should be
/// applied.
pub fn parse_line(line: &str) -> Result<Vec<Edit>> {
    if line.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut edits = Vec::new();
    let mut errors = Vec::new();

    for text in split_directives(line) {
        match classify(text).and_then(|directive| directive.edits(text)) {
            Ok(directive_edits) => {
                trace!(directive = text, edits = directive_edits.len(), "expanded directive");
                edits.extend(directive_edits);
            }
            Err(err) => errors.push(err),
        }
    }

    if errors.is_empty() {
        Ok(edits)
    } else {
        Err(BridgeError::InvalidLine { errors })
    }
}
