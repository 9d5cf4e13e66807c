use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dronedaddy::Cast;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Load every character and relationship and report any errors")]
pub struct Validate {
    /// Suppress all output except errors
    #[arg(long, short)]
    quiet: bool,
}

impl Validate {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let cast = Cast::load(root).context("the cast is invalid")?;

        if !self.quiet {
            let relationships: usize = cast
                .iter()
                .map(|character| character.relationships().len())
                .sum();
            println!(
                "{} {} characters and {relationships} relationships are valid",
                "✓".success(),
                cast.len(),
            );
        }

        Ok(())
    }
}
