//! A whole cast loaded from a data root
//!
//! The members of the cast come from the `characters` list in `cast.toml`
//! or, if that is empty, from the character directories found under the
//! root.

use std::{
    ops::Deref,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::{
    domain::{Character, CharacterName, Config, ConfigError, InvalidNameError},
    storage::{CharacterStore, DataSource, LoadError, config_path, parse_character_name_from_path},
};

/// Every character of a data root, each with its relationships to the
/// others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cast {
    root: PathBuf,
    config: Config,
    characters: Vec<Character>,
}

impl Cast {
    /// Loads the cast stored under `root` on the local filesystem.
    ///
    /// A missing `cast.toml` is treated as the default configuration.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid, names a character that cannot
    /// be a character name, or if any character cannot be loaded. No
    /// characters are returned if any one of them fails.
    pub fn load(root: impl Into<PathBuf>) -> Result<Self, CastError> {
        let root = root.into();
        let config = load_config(&root)?;
        let names = resolve_members(&root, &config)?;

        Self::build(&CharacterStore::new(&root), &names, config)
    }

    /// The names of the cast stored under `root`, without loading any
    /// characters.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or names a character that
    /// cannot be a character name.
    pub fn members(root: &Path) -> Result<Vec<CharacterName>, CastError> {
        let config = load_config(root)?;
        resolve_members(root, &config)
    }

    /// Builds the named characters from an existing store.
    ///
    /// Characters are loaded in the order given, and each gets its
    /// relationships to the other names in that order.
    ///
    /// # Errors
    ///
    /// Fails on the first character that cannot be loaded.
    pub fn build<S: DataSource>(
        store: &CharacterStore<S>,
        names: &[CharacterName],
        config: Config,
    ) -> Result<Self, CastError> {
        tracing::debug!(
            "Building a cast of {} under {}",
            names.len(),
            store.root().display()
        );

        let characters = names
            .iter()
            .map(|name| {
                let character = if config.blank_missing_relationships {
                    store.init_hand_crafted_or_blank(name, names)
                } else {
                    store.init_hand_crafted(name, names)
                };
                character.map_err(|source| CastError::Character {
                    name: name.clone(),
                    source,
                })
            })
            .collect::<Result<_, _>>()?;

        Ok(Self {
            root: store.root().to_path_buf(),
            config,
            characters,
        })
    }

    /// The data root the cast was loaded from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The configuration the cast was loaded with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The characters, in cast order.
    #[must_use]
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// The names of the characters, in cast order.
    pub fn names(&self) -> impl Iterator<Item = &CharacterName> {
        self.characters.iter().map(Character::name)
    }

    /// Looks up a character by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Character> {
        self.characters
            .iter()
            .find(|character| character.name() == name)
    }
}

impl Deref for Cast {
    type Target = [Character];

    fn deref(&self) -> &Self::Target {
        &self.characters
    }
}

impl<'a> IntoIterator for &'a Cast {
    type Item = &'a Character;
    type IntoIter = std::slice::Iter<'a, Character>;

    fn into_iter(self) -> Self::IntoIter {
        self.characters.iter()
    }
}

/// Errors that can occur when loading a [`Cast`].
#[derive(Debug, thiserror::Error)]
pub enum CastError {
    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The configuration lists an invalid character name.
    #[error(transparent)]
    Name(#[from] InvalidNameError),
    /// A character could not be loaded.
    #[error("failed to load character '{name}'")]
    Character {
        /// The character being loaded.
        name: CharacterName,
        /// The underlying error.
        #[source]
        source: LoadError,
    },
}

/// Reads `cast.toml`, falling back to the default configuration if there
/// is none.
fn load_config(root: &Path) -> Result<Config, ConfigError> {
    match Config::load(&config_path(root)) {
        Err(e) if e.is_not_found() => {
            tracing::debug!("No config under {}, using defaults", root.display());
            Ok(Config::default())
        }
        result => result,
    }
}

fn resolve_members(root: &Path, config: &Config) -> Result<Vec<CharacterName>, CastError> {
    if config.characters.is_empty() {
        return Ok(discover(root));
    }
    let names = config
        .characters
        .iter()
        .map(|name| name.as_str().parse())
        .collect::<Result<_, InvalidNameError>>()?;
    Ok(names)
}

/// Finds the characters stored under `root`, sorted by name.
fn discover(root: &Path) -> Vec<CharacterName> {
    let mut names: Vec<_> = WalkDir::new(root)
        .min_depth(2)
        .max_depth(2)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| parse_character_name_from_path(entry.path(), root))
        .collect();
    names.sort();

    tracing::debug!("Discovered {} characters under {}", names.len(), root.display());
    names
}
