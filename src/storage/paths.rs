//! Path construction for the files in a data root
//!
//! ```text
//! <root>/cast.toml
//! <root>/<character>/character.dat
//! <root>/relationships/<character>_<other>.dat
//! ```

use std::path::{Path, PathBuf};

use crate::domain::CharacterName;

const CHARACTER_FILE: &str = "character.dat";
const RELATIONSHIPS_DIR: &str = "relationships";
const CONFIG_FILE: &str = "cast.toml";

/// The path of a character's data file.
#[must_use]
pub fn character_path(root: &Path, name: &CharacterName) -> PathBuf {
    root.join(name.as_str()).join(CHARACTER_FILE)
}

/// The path of a relationship's data file, given its pair name.
#[must_use]
pub fn relationship_path(root: &Path, pair_name: &str) -> PathBuf {
    root.join(RELATIONSHIPS_DIR).join(format!("{pair_name}.dat"))
}

/// The path of the cast configuration file.
#[must_use]
pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Recovers the character name from the path of a character file.
///
/// Returns `None` unless `path` is exactly `<root>/<name>/character.dat` for
/// a valid name. The relationships directory is never a character.
#[must_use]
pub fn parse_character_name_from_path(path: &Path, root: &Path) -> Option<CharacterName> {
    let relative = path.strip_prefix(root).ok()?;
    if relative.file_name()? != CHARACTER_FILE {
        return None;
    }

    let directory = relative.parent()?;
    if directory.parent() != Some(Path::new("")) {
        return None;
    }

    let name = directory.to_str()?;
    if name == RELATIONSHIPS_DIR {
        return None;
    }
    name.parse().ok()
}
