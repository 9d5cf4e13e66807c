use std::{
    io,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    domain::{
        Attributes, Character, Gender, GenderSexRelationship, Modifier, Mood, Orientation,
        Relationship, RelationshipState, RelationshipThresholds, Sex, ValidationError,
    },
    storage::DataSource,
};

/// Reads the named attributes from a JSON data file.
///
/// # Errors
///
/// Returns [`LoadError::NotFound`] if the file does not exist and
/// [`LoadError::Malformed`] if it does not hold a JSON object.
pub(crate) fn read_attributes<S: DataSource>(
    source: &S,
    path: &Path,
    names: &[&str],
) -> Result<Attributes, LoadError> {
    tracing::debug!("Reading {}", path.display());

    let contents = source.read(path).map_err(|io_error| match io_error.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: io_error,
        },
    })?;

    let object: Map<String, Value> =
        serde_json::from_str(&contents).map_err(|source| LoadError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(Attributes::select(object, names))
}

/// Writes a record as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if the record cannot be serialized or the source cannot
/// be written to.
pub(crate) fn write_record<S: DataSource, T: Serialize>(
    source: &S,
    path: &Path,
    record: &T,
) -> Result<(), SaveError> {
    let mut contents = serde_json::to_string_pretty(record)?;
    contents.push('\n');

    source
        .write(path, &contents)
        .map_err(|source| SaveError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!("Wrote {}", path.display());
    Ok(())
}

/// Errors that can occur when loading a character or relationship.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The data file was not found.
    #[error("no data file at {}", path.display())]
    NotFound {
        /// The expected location of the file.
        path: PathBuf,
    },
    /// An I/O error occurred.
    #[error("failed to read {}", path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// The file does not hold a JSON object.
    #[error("malformed data in {}", path.display())]
    Malformed {
        /// The file being read.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
    /// An attribute failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl LoadError {
    /// Whether the error is just a missing file.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors that can occur when saving a character or relationship.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The record could not be serialized.
    #[error("failed to serialize record")]
    Serialize(#[from] serde_json::Error),
    /// The file could not be written.
    #[error("failed to write {}", path.display())]
    Io {
        /// The file being written.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}

/// The on-disk form of a character.
///
/// Relationships are not part of the character file; each is saved to its
/// own file.
#[derive(Debug, Serialize)]
pub(crate) struct CharacterRecord<'a> {
    display_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    sex: Sex,
    gender: Gender,
    orientation: Orientation,
    gender_sex_relationship: GenderSexRelationship,
    #[serde(skip_serializing_if = "Option::is_none")]
    emotional_state: Option<Mood>,
    relationship_thresholds: &'a RelationshipThresholds,
}

impl<'a> From<&'a Character> for CharacterRecord<'a> {
    fn from(character: &'a Character) -> Self {
        Self {
            display_name: character.display_name(),
            description: character.description(),
            sex: character.sex(),
            gender: character.gender(),
            orientation: character.orientation(),
            gender_sex_relationship: character.gender_sex_relationship(),
            emotional_state: character.emotional_state(),
            relationship_thresholds: character.relationship_thresholds(),
        }
    }
}

/// The on-disk form of a relationship.
///
/// The pair name is not stored; it is implied by the file name.
#[derive(Debug, Serialize)]
pub(crate) struct RelationshipRecord<'a> {
    ship_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    score: i64,
    state: RelationshipState,
    modifier: Modifier,
}

impl<'a> From<&'a Relationship> for RelationshipRecord<'a> {
    fn from(relationship: &'a Relationship) -> Self {
        Self {
            ship_name: relationship.ship_name(),
            description: relationship.description(),
            score: relationship.score(),
            state: relationship.state(),
            modifier: relationship.modifier(),
        }
    }
}
