// src/bin/cli.rs
use color_eyre::eyre;

use ow_scrape::cli;

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    Ok(())
}
