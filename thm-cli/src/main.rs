//! thm-cli - Command line tool for rendering daily temperature heatmaps.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "thm-cli",
    version,
    about = "Calendar heatmaps of daily temperature records"
)]
struct Cli {
    #[command(subcommand)]
    command: thm_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    log::debug!("starting thm-cli {}", env!("CARGO_PKG_VERSION"));
    thm_cmd::run(cli.command)
}
