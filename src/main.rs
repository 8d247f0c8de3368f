//! artindex CLI: build the article index and write it as JSON.

use anyhow::Result;
use artindex::engine::arg_parser::Cli;
use artindex::engine::handle_run;
use clap::Parser;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
