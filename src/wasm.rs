//! WASM bindings for Jumper Core.
//!
//! This module exposes the directive engine to JavaScript. There is no
//! device in the browser: each accepted line yields the bridgelist command
//! that the caller is responsible for delivering (e.g. over Web Serial).
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmBridgeSession } from 'jumper_core';
//!
//! await init();
//!
//! const session = new WasmBridgeSession();
//! const command = session.apply("vcc-1-2, 10++(20,x,22)");
//! await writer.write(new TextEncoder().encode(command));
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::Netlist;
use crate::device::{format_bridgelist, RecordingSink, CLEAR_COMMAND};
use crate::error::BridgeError;
use crate::session::Session;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// WASM-compatible netlist editing session.
///
/// Wraps a native [`Session`] over an in-memory sink.
#[wasm_bindgen]
pub struct WasmBridgeSession {
    session: Session<RecordingSink>,
}

#[wasm_bindgen]
impl WasmBridgeSession {
    /// Create an empty session.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmBridgeSession {
        WasmBridgeSession {
            session: Session::new(RecordingSink::new()),
        }
    }

    /// Restore a session from the JSON array produced by [`Self::to_json`].
    #[wasm_bindgen]
    pub fn from_json(json: &str) -> Result<WasmBridgeSession, JsValue> {
        let netlist: Netlist = serde_json::from_str(json)
            .map_err(|e| to_js(BridgeError::malformed("<json>", e.to_string())))?;
        Ok(WasmBridgeSession {
            session: Session::new(RecordingSink::new()).with_netlist(netlist),
        })
    }

    /// Apply one directive line.
    ///
    /// # Returns
    /// The full bridgelist command to send to the board, or an error listing
    /// every invalid directive (in which case nothing changed).
    #[wasm_bindgen]
    pub fn apply(&mut self, line: &str) -> Result<String, JsValue> {
        self.session.process_line(line).map_err(to_js)?;
        Ok(format_bridgelist(self.session.netlist()))
    }

    /// Remove every bridge. Returns the command that clears the board.
    #[wasm_bindgen]
    pub fn clear(&mut self) -> Result<String, JsValue> {
        self.session.clear().map_err(to_js)?;
        Ok(CLEAR_COMMAND.to_string())
    }

    /// Current bridges as `label-label` strings.
    #[wasm_bindgen]
    pub fn bridges(&self) -> Vec<String> {
        self.session.netlist().edges().map(|e| e.to_string()).collect()
    }

    /// Current bridges as a JSON array, the same format as saved files.
    #[wasm_bindgen]
    pub fn to_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.session.netlist())
            .map_err(|e| to_js(BridgeError::WasmError { message: e.to_string() }))
    }
}

impl Default for WasmBridgeSession {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js(err: BridgeError) -> JsValue {
    let messages: Vec<String> = err.directive_errors().iter().map(|e| e.to_string()).collect();
    JsValue::from_str(&messages.join("\n"))
}
