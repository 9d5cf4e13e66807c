use std::path::Path;

use clap::Parser;
use dronedaddy::{Cast, CharacterName};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Default, Parser)]
#[command(about = "List the members of the cast")]
pub struct List {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl List {
    /// Reads the member names only; characters are not loaded.
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let members = Cast::members(root)?;

        match self.output {
            OutputFormat::Pretty => Self::output_pretty(&members),
            OutputFormat::Json => {
                let names: Vec<_> = members.iter().map(CharacterName::as_str).collect();
                println!("{}", serde_json::to_string_pretty(&names)?);
            }
        }

        Ok(())
    }

    fn output_pretty(members: &[CharacterName]) {
        if members.is_empty() {
            println!("{}", "No characters found".dim());
            return;
        }

        for name in members {
            println!("{name}");
        }
        println!("\n{}", format!("{} characters", members.len()).info());
    }
}
