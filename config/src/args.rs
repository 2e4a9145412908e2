use clap::Parser;
use std::path::PathBuf;

/// Scrollfeed playback simulator
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a scenario config file (yaml). The built-in demo scenario
    /// runs when omitted.
    #[clap(long)]
    pub config: Option<PathBuf>,
}
