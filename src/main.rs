use clap::Parser;
use color_eyre::Result;
use scrollfeed_config::Args;
use scrollfeed_simulator::{
    init_logging,
    App,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;
    App::new(Args::parse())?.run().await
}
