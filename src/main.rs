use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use gridsnake::game::GameConfig;
use gridsnake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "gridsnake")]
#[command(version, about = "Terminal snake on a fixed-cadence grid simulation")]
struct Cli {
    /// Grid width in cells
    #[arg(long, default_value_t = 30)]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = 20)]
    height: usize,

    /// Milliseconds between simulation steps
    #[arg(long = "tick-ms", default_value_t = 100)]
    tick_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = GameConfig {
        tick_interval: Duration::from_millis(cli.tick_ms),
        ..GameConfig::new(cli.width, cli.height)
    };

    let mut mode = HumanMode::new(config)?;
    mode.run().await
}
