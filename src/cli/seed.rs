use std::path::PathBuf;

use clap::Parser;
use dronedaddy::{
    Cast, CharacterName, Relationship, RelationshipStore, storage::relationship_path,
};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Write blank relationship files for every pair that has none")]
pub struct Seed {
    /// Show what would be created without writing anything
    #[arg(long)]
    dry_run: bool,
}

impl Seed {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let members = Cast::members(&root)?;
        let store = RelationshipStore::new(root);

        let missing: Vec<_> = missing_pairs(&store, &members).collect();
        if missing.is_empty() {
            println!("{}", "Every pair already has a relationship".success());
            return Ok(());
        }

        for (name, other) in missing {
            let relationship = Relationship::blank(name, other);
            let path = if self.dry_run {
                relationship_path(store.root(), relationship.name())
            } else {
                store.save(&relationship)?
            };
            let verb = if self.dry_run { "Would create" } else { "Created" };
            println!("{} {}", verb.info(), path.display());
        }

        Ok(())
    }
}

/// Every ordered pair of distinct members with no relationship file.
fn missing_pairs<'a>(
    store: &'a RelationshipStore,
    members: &'a [CharacterName],
) -> impl Iterator<Item = (&'a CharacterName, &'a CharacterName)> {
    members
        .iter()
        .flat_map(move |name| name.others(members).map(move |other| (name, other)))
        .filter(move |(name, other)| {
            matches!(store.init_relationship(name, other), Err(e) if e.is_not_found())
        })
}
