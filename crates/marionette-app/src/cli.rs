use std::path::PathBuf;

use clap::Parser;

/// Marionette: drive native widgets through the remote object protocol.
///
/// Protocol operations are written to stdout as JSON lines; logs go to stderr.
#[derive(Parser, Debug)]
#[command(name = "marionette", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override, as a tracing filter directive.
    #[arg(long)]
    pub log_level: Option<String>,

    /// JSON layout to build instead of the built-in demo.
    #[arg(long)]
    pub layout: Option<PathBuf>,

    /// Selector to search for below the root; may be repeated.
    #[arg(long = "select", value_name = "SELECTOR")]
    pub selectors: Vec<String>,

    /// Read native messages (JSON lines) from stdin after building.
    #[arg(long)]
    pub replay: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
