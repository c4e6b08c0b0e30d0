//! Wire commands understood by the breadboard firmware.

use crate::circuit::Netlist;

/// Command that removes every bridge on the board.
pub const CLEAR_COMMAND: &str = "::bridgelist[]";

/// Sentinel bridge pair that puts the on-board microcontroller into flashing mode.
pub const FLASH_MODE_COMMAND: &str = "::bridgelist[116-70,117-71]";

/// Render the full netlist as a bridgelist command.
///
/// The device has no incremental protocol, so this is always the complete
/// state: `::bridgelist[a-b,c-d,...]`, or [`CLEAR_COMMAND`] when empty.
pub fn format_bridgelist(netlist: &Netlist) -> String {
    let tokens: Vec<String> = netlist.edges().map(|edge| edge.to_string()).collect();
    format!("::bridgelist[{}]", tokens.join(","))
}

/// ASCII bytes of [`format_bridgelist`].
pub fn encode_bridgelist(netlist: &Netlist) -> Vec<u8> {
    format_bridgelist(netlist).into_bytes()
}
