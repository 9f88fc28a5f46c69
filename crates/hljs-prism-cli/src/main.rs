mod cli;
mod convert;

use anyhow::Result;
use clap::Parser;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let converted = convert::run(&cli)?;
    tracing::info!(themes = converted, dest = %cli.dest_dir.display(), "conversion finished");
    Ok(())
}
