//! Jumper - Breadboard Netlist Editor
//!
//! Interactive editor that keeps a reconfigurable breadboard's bridges in
//! sync with a short textual description.
//!
//! # Usage
//!
//! ```bash
//! jumper --dir ~/boards -v
//! ```

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use jumper_core::{
    device::{find_devices, DeviceConfig, SerialSink},
    error::Result,
    repl::Repl,
    Session, DEFAULT_BAUD_RATE, DEFAULT_TIMEOUT_MS,
};
use tracing_subscriber::EnvFilter;

/// Breadboard netlist editor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Serial port of the board (skips USB discovery)
    #[arg(short, long, value_name = "PORT")]
    port: Option<String>,

    /// Serial line speed
    #[arg(short, long, default_value_t = DEFAULT_BAUD_RATE)]
    baud: u32,

    /// Serial read/write timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Directory for saved netlists
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    dir: PathBuf,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout belongs to the shell
    let default_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let mut repl = Repl::new(io::stdin().lock(), io::stdout());

    // Find the board
    let port = match args.port {
        Some(port) => port,
        None => repl.select_device(&find_devices()?)?.name,
    };

    // Open it
    let config = DeviceConfig::new()
        .with_baud_rate(args.baud)
        .with_timeout(Duration::from_millis(args.timeout_ms));
    let sink = SerialSink::open(port, config)?;

    // Run the shell
    let mut session = Session::new(sink).with_storage_dir(args.dir);
    repl.run(&mut session)
}
