//! Serial transport for the physical breadboard.

use std::io::{Read, Write};
use std::thread;
use std::time::Duration;

use serialport::{SerialPort, SerialPortType};
use tracing::{debug, info, warn};

use super::command::{encode_bridgelist, CLEAR_COMMAND, FLASH_MODE_COMMAND};
use super::sink::NetlistSink;
use super::{DeviceInfo, USB_PID, USB_VID};
use crate::circuit::Netlist;
use crate::error::{BridgeError, Result};
use crate::{DEFAULT_BAUD_RATE, DEFAULT_TIMEOUT_MS};

/// Configuration for the serial connection.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Line speed in baud.
    pub baud_rate: u32,
    /// Read/write timeout.
    pub timeout: Duration,
    /// Pause after reopening the port before the netlist is pushed again.
    pub settle_delay: Duration,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            settle_delay: Duration::from_secs(1),
        }
    }
}

impl DeviceConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the baud rate.
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Set the read/write timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the delay after reopening the port.
    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }
}

/// List attached breadboards by their USB identifiers.
pub fn find_devices() -> Result<Vec<DeviceInfo>> {
    let ports = serialport::available_ports()?;
    let devices: Vec<DeviceInfo> = ports
        .into_iter()
        .filter_map(|port| match port.port_type {
            SerialPortType::UsbPort(usb) if usb.vid == USB_VID && usb.pid == USB_PID => {
                Some(DeviceInfo {
                    description: usb.product.unwrap_or_else(|| "Jumperless".to_string()),
                    name: port.port_name,
                })
            }
            _ => None,
        })
        .collect();
    debug!(count = devices.len(), "scanned serial ports");
    Ok(devices)
}

/// A breadboard attached over a serial port.
pub struct SerialSink {
    port_name: String,
    config: DeviceConfig,
    port: Option<Box<dyn SerialPort>>,
}

impl SerialSink {
    /// Open the named port.
    pub fn open(port_name: impl Into<String>, config: DeviceConfig) -> Result<Self> {
        let port_name = port_name.into();
        let port = open_port(&port_name, &config)?;
        info!(port = %port_name, baud = config.baud_rate, "opened device");
        Ok(Self {
            port_name,
            config,
            port: Some(port),
        })
    }

    /// The open port, reopening it first if it was released or a reopen failed earlier.
    fn port(&mut self) -> Result<&mut Box<dyn SerialPort>> {
        let (name, config) = (&self.port_name, &self.config);
        if reacquire(&mut self.port, || open_port(name, config))? {
            thread::sleep(self.config.settle_delay);
            info!(port = %self.port_name, "reopened device");
        }
        self.port.as_mut().ok_or_else(|| BridgeError::DeviceIo {
            source: std::io::Error::new(std::io::ErrorKind::NotConnected, "device port is closed"),
        })
    }

    fn write_command(&mut self, command: &[u8]) -> Result<()> {
        let port = self.port()?;
        port.write_all(command)
            .and_then(|_| port.flush())
            .map_err(|source| BridgeError::DeviceIo { source })?;
        debug!(bytes = command.len(), "wrote command");
        Ok(())
    }

    /// Read whatever reply is already buffered. The reply is logged but not
    /// interpreted; the firmware's acknowledgement is not part of the protocol.
    fn drain_reply(&mut self) {
        let Some(port) = self.port.as_mut() else { return };
        let pending = match port.bytes_to_read() {
            Ok(n) => n as usize,
            Err(err) => {
                warn!(error = %err, "could not query device reply");
                return;
            }
        };
        if pending == 0 {
            return;
        }
        let mut reply = vec![0u8; pending];
        match port.read(&mut reply) {
            Ok(n) => debug!(reply = %String::from_utf8_lossy(&reply[..n]), "device reply"),
            Err(err) => warn!(error = %err, "could not read device reply"),
        }
    }
}

impl NetlistSink for SerialSink {
    fn push(&mut self, netlist: &Netlist) -> Result<()> {
        self.write_command(&encode_bridgelist(netlist))?;
        self.drain_reply();
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.write_command(CLEAR_COMMAND.as_bytes())
    }

    fn enter_maintenance(&mut self) -> Result<()> {
        self.write_command(FLASH_MODE_COMMAND.as_bytes())?;
        // Dropping the handle closes the port for the flashing tool
        self.port = None;
        info!(port = %self.port_name, "released device for flashing");
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        self.port().map(|_| ())
    }
}

/// Fill an empty port slot with `open`. Returns `true` if a new port was opened.
///
/// A failed open leaves the slot empty, so the next caller tries again.
fn reacquire<P>(slot: &mut Option<P>, open: impl FnOnce() -> Result<P>) -> Result<bool> {
    if slot.is_some() {
        return Ok(false);
    }
    *slot = Some(open()?);
    Ok(true)
}

fn open_port(port_name: &str, config: &DeviceConfig) -> Result<Box<dyn SerialPort>> {
    let port = serialport::new(port_name, config.baud_rate)
        .timeout(config.timeout)
        .open()?;
    Ok(port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_config_builder() {
        let config = DeviceConfig::new()
            .with_baud_rate(9600)
            .with_timeout(Duration::from_millis(250))
            .with_settle_delay(Duration::ZERO);
        assert_eq!(config.baud_rate, 9600);
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.settle_delay, Duration::ZERO);
    }

    #[test]
    fn test_reacquire_retries_after_failed_open() {
        let mut slot: Option<u32> = None;

        // Device not back yet: the slot stays empty
        let first = reacquire(&mut slot, || Err(BridgeError::DeviceNotFound));
        assert!(matches!(first, Err(BridgeError::DeviceNotFound)));
        assert_eq!(slot, None);

        // The next write tries again and succeeds
        assert!(reacquire(&mut slot, || Ok(7)).unwrap());
        assert_eq!(slot, Some(7));

        // An open port is left alone
        assert!(!reacquire(&mut slot, || panic!("port reopened while open")).unwrap());
        assert_eq!(slot, Some(7));
    }

    #[test]
    fn test_device_config_defaults() {
        let config = DeviceConfig::default();
        assert_eq!(config.baud_rate, 115_200);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
