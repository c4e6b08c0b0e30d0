//! Error types for the Jumper netlist editor.
//!
//! This module provides a unified error type [`BridgeError`] that covers
//! all error conditions that can occur during directive parsing, netlist
//! persistence, and device communication.

use thiserror::Error;

/// Result type alias using [`BridgeError`].
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Unified error type for all Jumper operations.
#[derive(Error, Debug)]
pub enum BridgeError {
    // ============ Directive Errors ============
    /// Directive matches none of the known grammars
    #[error("Invalid connection: '{directive}'")]
    InvalidDirective { directive: String },

    /// Incremented series that produces no connections
    #[error("No valid connections in array '{directive}'")]
    EmptyExpansion { directive: String },

    /// Directive would connect a label to itself
    #[error("Cannot connect '{label}' to itself in '{directive}'")]
    SelfConnection { directive: String, label: String },

    /// Incremented series runs past the largest pin number
    #[error("Pin number overflow in '{directive}'")]
    PinOverflow { directive: String },

    /// One or more directives in a line were rejected; nothing was applied
    #[error("Line rejected: {} invalid directive(s)", .errors.len())]
    InvalidLine { errors: Vec<BridgeError> },

    // ============ Device Errors ============
    /// No breadboard attached
    #[error("No Jumperless found")]
    DeviceNotFound,

    /// Operator picked an invalid device from the candidate list
    #[error("Invalid device selection: {message}")]
    DeviceSelection { message: String },

    /// Serial transport failure
    #[cfg(feature = "cli")]
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// Device write/read failure
    #[error("Device I/O error: {source}")]
    DeviceIo {
        #[source]
        source: std::io::Error,
    },

    // ============ Console Errors ============
    /// Error reading operator input or writing to the terminal
    #[error("Console I/O error: {source}")]
    Console {
        #[source]
        source: std::io::Error,
    },

    // ============ Persistence Errors ============
    /// Netlist file does not exist
    #[error("File {path} not found")]
    FileNotFound { path: String },

    /// Netlist file exists but cannot be understood
    #[error("Malformed netlist file '{path}': {message}")]
    MalformedFile { path: String, message: String },

    /// Error writing or reading a netlist file
    #[error("Failed to access netlist file '{path}': {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Refused to save an empty netlist
    #[error("No connections to save")]
    NothingToSave,

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl BridgeError {
    /// Create an invalid directive error
    pub fn invalid(directive: impl Into<String>) -> Self {
        Self::InvalidDirective {
            directive: directive.into(),
        }
    }

    /// Create an empty expansion error
    pub fn empty_expansion(directive: impl Into<String>) -> Self {
        Self::EmptyExpansion {
            directive: directive.into(),
        }
    }

    /// Create a self connection error
    pub fn self_connection(directive: impl Into<String>, label: impl Into<String>) -> Self {
        Self::SelfConnection {
            directive: directive.into(),
            label: label.into(),
        }
    }

    /// Create a malformed file error
    pub fn malformed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedFile {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Errors carried by this error: the nested list for
    /// [`BridgeError::InvalidLine`], otherwise the error itself.
    pub fn directive_errors(&self) -> Vec<&BridgeError> {
        match self {
            Self::InvalidLine { errors } => errors.iter().collect(),
            other => vec![other],
        }
    }
}
