//! # Jumper Core
//!
//! A netlist editor for reconfigurable breadboards.
//!
//! This library provides:
//! - A compact directive language for connecting and disconnecting contacts
//! - An undirected bridge graph with transitive reconnection on removal
//! - Encoding of the full bridge set into the device's wire command
//! - JSON persistence and an interactive shell (CLI only)
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`dsl`] - Splitter, classifier and expansion of directive lines
//! - [`circuit`] - Labels, bridges and the netlist graph
//! - [`device`] - Wire encoding and the device sink interface
//! - [`storage`] - Netlist files
//! - [`session`] - Two-phase application of lines and device sync
//! - [`repl`] - Interactive shell (CLI only)
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! jumper                      # find the board over USB and start the shell
//! jumper --port /dev/ttyACM0  # skip discovery
//! ```
//!
//! ### Library
//!
//! ```
//! use jumper_core::{device::RecordingSink, Session};
//!
//! let mut session = Session::new(RecordingSink::new());
//! session.process_line("vcc-1-2, 10++(20,x,22)").unwrap();
//! assert_eq!(
//!     session.sink().last_command(),
//!     Some("::bridgelist[1-2,1-5v,10-20,12-22]")
//! );
//! ```
//!
//! ## Line Processing
//!
//! Each line is handled in two phases:
//!
//! 1. Split into directives, classify each, and expand it into edits
//! 2. If every directive was valid, apply the edits in order and push the
//!    whole netlist to the device
//!
//! A single bad directive rejects the whole line; the netlist and the device
//! are left as they were.

pub mod circuit;
pub mod device;
pub mod dsl;
pub mod error;
pub mod session;
pub mod storage;

#[cfg(feature = "cli")]
pub mod repl;

// Re-export main types for convenience
pub use circuit::Netlist;
pub use error::{BridgeError, Result};
pub use session::Session;

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmBridgeSession;

/// Default serial line speed in baud
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Default serial read/write timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;
