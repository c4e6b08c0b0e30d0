//! Device side of the netlist editor.
//!
//! The breadboard firmware accepts one ASCII command: a full list of bridges,
//! `::bridgelist[a-b,c-d,...]`. This module provides:
//!
//! - [`command`] - Encoding of the netlist into that command
//! - [`NetlistSink`] - The capability the session pushes through
//! - [`RecordingSink`] - An in-memory sink for tests and WASM
//! - `SerialSink` - The serial-port transport (CLI only)

pub mod command;
mod sink;

#[cfg(feature = "cli")]
mod serial;

pub use command::{encode_bridgelist, format_bridgelist, CLEAR_COMMAND, FLASH_MODE_COMMAND};
pub use sink::{NetlistSink, RecordingSink};

#[cfg(feature = "cli")]
pub use serial::{find_devices, DeviceConfig, SerialSink};

use crate::error::{BridgeError, Result};

/// USB vendor ID of the breadboard.
pub const USB_VID: u16 = 0x1D50;

/// USB product ID of the breadboard.
pub const USB_PID: u16 = 0xACAB;

/// A candidate device found during discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Port name to open (e.g. `/dev/ttyACM0`, `COM3`)
    pub name: String,
    /// Human-readable description
    pub description: String,
}

/// Resolve the operator's answer to a "pick a device" prompt.
///
/// With no candidates this is [`BridgeError::DeviceNotFound`]. A single
/// candidate is chosen without looking at `answer`.
pub fn pick_device<'a>(candidates: &'a [DeviceInfo], answer: &str) -> Result<&'a DeviceInfo> {
    match candidates {
        [] => Err(BridgeError::DeviceNotFound),
        [only] => Ok(only),
        _ => {
            let answer = answer.trim();
            answer
                .parse::<usize>()
                .ok()
                .and_then(|index| candidates.get(index))
                .ok_or_else(|| BridgeError::DeviceSelection {
                    message: format!("'{}' is not one of 0..{}", answer, candidates.len()),
                })
        }
    }
}
