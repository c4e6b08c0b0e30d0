//! Netlist files.
//!
//! A netlist is stored as `<name>.json` holding a JSON array of
//! `"label-label"` strings, e.g. `["1-5v", "20-40"]`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::circuit::Netlist;
use crate::error::{BridgeError, Result};

/// File extension for netlist files.
pub const NETLIST_EXTENSION: &str = "json";

/// Path of the netlist file called `name` inside `dir`.
pub fn netlist_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.{}", name, NETLIST_EXTENSION))
}

/// Write a netlist to `<dir>/<name>.json`.
pub fn save_netlist(dir: &Path, name: &str, netlist: &Netlist) -> Result<PathBuf> {
    let path = netlist_path(dir, name);
    let json = serde_json::to_string_pretty(netlist)
        .map_err(|e| BridgeError::malformed(path.display().to_string(), e.to_string()))?;
    fs::write(&path, json).map_err(|source| BridgeError::FileIo {
        path: path.display().to_string(),
        source,
    })?;
    info!(path = %path.display(), bridges = netlist.len(), "saved netlist");
    Ok(path)
}

/// Read a netlist from `<dir>/<name>.json`.
pub fn load_netlist(dir: &Path, name: &str) -> Result<Netlist> {
    let path = netlist_path(dir, name);
    let content = fs::read_to_string(&path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => BridgeError::FileNotFound {
            path: path.display().to_string(),
        },
        ErrorKind::InvalidData => BridgeError::malformed(path.display().to_string(), source.to_string()),
        _ => BridgeError::FileIo {
            path: path.display().to_string(),
            source,
        },
    })?;
    let netlist: Netlist = serde_json::from_str(&content)
        .map_err(|e| BridgeError::malformed(path.display().to_string(), e.to_string()))?;
    info!(path = %path.display(), bridges = netlist.len(), "loaded netlist");
    Ok(netlist)
}
