//! Domain models for a visual-novel cast.
//!
//! This module contains the character and relationship records, the fixed
//! enumerations they are built from, and the cast configuration.

mod attributes;
pub use attributes::Attributes;

/// Fixed enumerations with stable integer codes.
pub mod enumeration;
pub use enumeration::{
    Enumeration, Fallback, Gender, GenderSexRelationship, Modifier, Mood, Orientation,
    RelationshipState, Sex,
};

mod name;
pub use name::{CharacterName, InvalidNameError};

mod thresholds;
pub use thresholds::{RelationshipThresholds, ValidationError};

/// Character domain model and attribute validation.
pub mod character;
pub use character::Character;

/// Relationship domain model and attribute validation.
pub mod relationship;
pub use relationship::Relationship;

/// Cast configuration.
pub mod config;
pub use config::{Config, ConfigError};
