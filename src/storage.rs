mod source;
pub use source::{Bundle, DataSource, FileSystem};

/// JSON serialization for character and relationship files.
pub mod json;
pub use json::{LoadError, SaveError};

mod paths;
pub use paths::{character_path, config_path, parse_character_name_from_path, relationship_path};

mod relationship_store;
pub use relationship_store::RelationshipStore;

mod character_store;
pub use character_store::CharacterStore;

/// A whole cast loaded from a data root.
pub mod cast;
pub use cast::{Cast, CastError};
