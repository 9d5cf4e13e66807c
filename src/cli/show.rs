use std::path::PathBuf;

use clap::Parser;
use dronedaddy::{Cast, Character, CharacterName, Enumeration, Relationship};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Display a character and its relationships")]
pub struct Show {
    /// The name of the character to display
    name: CharacterName,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl Show {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let cast = Cast::load(root)?;

        let Some(character) = cast.get(&self.name) else {
            eprintln!("Character {} not found", self.name);
            std::process::exit(1);
        };

        match self.output {
            OutputFormat::Pretty => Self::output_pretty(character),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(character)?),
        }

        Ok(())
    }

    fn output_pretty(character: &Character) {
        println!("# {}", character.display_name());
        if let Some(description) = character.description() {
            println!("{description}");
        }

        println!("\n{}", "Identity".dim());
        println!("  Name:        {}", character.name());
        println!("  Sex:         {}", character.sex());
        println!("  Gender:      {}", character.gender());
        println!("  Orientation: {}", character.orientation());
        println!("  Identity:    {}", character.gender_sex_relationship());
        let mood = character
            .emotional_state()
            .map_or_else(|| "none".dim(), |mood| mood.to_string());
        println!("  Mood:        {mood}");

        println!("\n{}", "Thresholds".dim());
        for (state, threshold) in character.relationship_thresholds().iter() {
            println!("  {:<8} {threshold}", state.label());
        }

        if !character.relationships().is_empty() {
            println!("\n{}", "Relationships".dim());
            for relationship in character.relationships() {
                Self::output_relationship(relationship);
            }
        }
    }

    fn output_relationship(relationship: &Relationship) {
        let ship = if relationship.ship_name() == relationship.name() {
            String::new()
        } else {
            format!(" \"{}\"", relationship.ship_name())
        };
        println!(
            "  • {}{ship}: {} ({}, {})",
            relationship.name(),
            relationship.state().label().info(),
            relationship.score(),
            relationship.modifier(),
        );
        if let Some(description) = relationship.description() {
            println!("    {}", description.dim());
        }
    }
}
