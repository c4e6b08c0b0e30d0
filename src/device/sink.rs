//! Capability interface between the netlist editor and the device.

use std::io;

use tracing::debug;

use super::command::{format_bridgelist, CLEAR_COMMAND, FLASH_MODE_COMMAND};
use crate::circuit::Netlist;
use crate::error::{BridgeError, Result};

/// Something that mirrors the netlist onto hardware.
///
/// Every push carries the full netlist; sinks never see diffs.
pub trait NetlistSink {
    /// Push a snapshot of the full netlist.
    fn push(&mut self, netlist: &Netlist) -> Result<()>;

    /// Remove every bridge on the device.
    fn clear(&mut self) -> Result<()>;

    /// Put the device into its maintenance (firmware flashing) mode and
    /// release it so external tools can talk to it.
    fn enter_maintenance(&mut self) -> Result<()>;

    /// Reacquire the device after maintenance.
    fn resume(&mut self) -> Result<()>;
}

/// In-memory sink that records every command it would have sent.
///
/// Used for tests and for the WASM bindings, where there is no device.
#[derive(Debug, Default)]
pub struct RecordingSink {
    commands: Vec<String>,
    in_maintenance: bool,
}

impl RecordingSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands sent so far, oldest first.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// The most recent command, if any.
    pub fn last_command(&self) -> Option<&str> {
        self.commands.last().map(String::as_str)
    }

    /// Check if the sink is released for maintenance.
    pub fn in_maintenance(&self) -> bool {
        self.in_maintenance
    }

    fn send(&mut self, command: String) -> Result<()> {
        if self.in_maintenance {
            return Err(BridgeError::DeviceIo {
                source: io::Error::new(io::ErrorKind::NotConnected, "device released for maintenance"),
            });
        }
        debug!(%command, "recorded command");
        self.commands.push(command);
        Ok(())
    }
}

impl NetlistSink for RecordingSink {
    fn push(&mut self, netlist: &Netlist) -> Result<()> {
        self.send(format_bridgelist(netlist))
    }

    fn clear(&mut self) -> Result<()> {
        self.send(CLEAR_COMMAND.to_string())
    }

    fn enter_maintenance(&mut self) -> Result<()> {
        self.send(FLASH_MODE_COMMAND.to_string())?;
        self.in_maintenance = true;
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        self.in_maintenance = false;
        Ok(())
    }
}
