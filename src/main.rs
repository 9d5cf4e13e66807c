//! `cast`: inspect and maintain the character data of a visual-novel cast.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
