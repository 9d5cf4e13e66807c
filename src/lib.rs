//! Character and relationship data for a visual-novel cast.
//!
//! Each character lives in its own directory under a data root, with a
//! `character.dat` JSON file describing it. Pairwise relationships are stored
//! under `relationships/`. Loading a record validates every attribute,
//! substituting a safe default for anything unrecognised so that bad data
//! never blocks the story.

pub mod domain;
pub use domain::{
    Attributes, Character, CharacterName, Config, ConfigError, Enumeration, Fallback, Gender,
    GenderSexRelationship, InvalidNameError, Modifier, Mood, Orientation, Relationship,
    RelationshipState, RelationshipThresholds, Sex, ValidationError,
};

/// Storage access and loaders for character and relationship files.
pub mod storage;
pub use storage::{
    Bundle, Cast, CastError, CharacterStore, DataSource, FileSystem, LoadError,
    RelationshipStore, SaveError,
};
