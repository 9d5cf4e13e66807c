use std::path::{Path, PathBuf};

use tracing::instrument;

use crate::{
    domain::{Attributes, Character, CharacterName},
    storage::{
        DataSource, FileSystem, LoadError, RelationshipStore, SaveError, character_path,
        json::{CharacterRecord, read_attributes, write_record},
    },
};

/// Loads and saves character files under a data root.
///
/// Relationships are read through the [`RelationshipStore`] for the same
/// root.
#[derive(Debug, Clone)]
pub struct CharacterStore<S = FileSystem> {
    relationships: RelationshipStore<S>,
}

impl CharacterStore {
    /// Opens a data root on the local filesystem.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_source(root, FileSystem)
    }
}

impl<S: DataSource> CharacterStore<S> {
    /// Opens a data root read through the given source.
    #[must_use]
    pub fn with_source(root: impl Into<PathBuf>, source: S) -> Self {
        Self {
            relationships: RelationshipStore::with_source(root, source),
        }
    }

    /// The data root.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.relationships.root()
    }

    /// The store used for this root's relationships.
    #[must_use]
    pub const fn relationships(&self) -> &RelationshipStore<S> {
        &self.relationships
    }

    /// Reads the raw attributes of a character.
    ///
    /// Attributes missing from the file are `null`.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing or is not a JSON object.
    pub fn load(
        &self,
        name: &CharacterName,
        attributes: &[&str],
    ) -> Result<Attributes, LoadError> {
        let path = character_path(self.root(), name);
        read_attributes(self.relationships.source(), &path, attributes)
    }

    /// Loads a character without its relationships.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing, is not a JSON object, or has invalid
    /// relationship thresholds.
    #[instrument(level = "debug", skip_all, fields(%name))]
    pub fn init_from_file(&self, name: &CharacterName) -> Result<Character, LoadError> {
        let attributes: Vec<_> = Character::attributes().collect();
        let values = self.load(name, &attributes)?;
        Ok(Character::construct(name.clone(), &values)?)
    }

    /// Loads a character along with its relationships to the rest of `cast`.
    ///
    /// `cast` may include the character itself; no self-relationship is
    /// created.
    ///
    /// # Errors
    ///
    /// Fails if the character or any of its relationships cannot be loaded.
    pub fn init_hand_crafted(
        &self,
        name: &CharacterName,
        cast: &[CharacterName],
    ) -> Result<Character, LoadError> {
        let character = self.init_from_file(name)?;
        let relationships = self
            .relationships
            .init_hand_crafted_relationships(name, cast)?;
        Ok(character.with_relationships(relationships))
    }

    /// Like [`Self::init_hand_crafted`], but pairs with no relationship file
    /// get a blank relationship.
    ///
    /// # Errors
    ///
    /// Fails if the character cannot be loaded or a relationship file exists
    /// but cannot be loaded.
    pub fn init_hand_crafted_or_blank(
        &self,
        name: &CharacterName,
        cast: &[CharacterName],
    ) -> Result<Character, LoadError> {
        let character = self.init_from_file(name)?;
        let relationships = self.relationships.init_relationships_or_blank(name, cast)?;
        Ok(character.with_relationships(relationships))
    }

    /// Writes a character to its file, returning the path written.
    ///
    /// Relationships are not written; save them through
    /// [`Self::relationships`].
    ///
    /// # Errors
    ///
    /// Fails if the source cannot be written to.
    pub fn save(&self, character: &Character) -> Result<PathBuf, SaveError> {
        let path = character_path(self.root(), character.name());
        write_record(
            self.relationships.source(),
            &path,
            &CharacterRecord::from(character),
        )?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{
        domain::{
            Gender, GenderSexRelationship, Mood, Orientation, Relationship, RelationshipState,
            Sex, ValidationError,
        },
        storage::Bundle,
    };

    const THRESHOLDS: &str =
        r#"{"HATE": -50, "DISLIKE": -10, "NEUTRAL": 0, "LIKE": 10, "LOVE": 50}"#;

    fn name(name: &str) -> CharacterName {
        name.parse().unwrap()
    }

    fn cast() -> Vec<CharacterName> {
        vec![name("Alex"), name("Sam"), name("Jo")]
    }

    fn bundle() -> Bundle {
        Bundle::new()
            .with_file(
                "data/Alex/character.dat",
                format!(
                    r#"{{
                        "display_name": "Al",
                        "description": "Runs the drone shop.",
                        "sex": "MALE",
                        "gender": "MALE",
                        "orientation": "GAY",
                        "emotional_state": "HAPPY",
                        "relationship_thresholds": {THRESHOLDS}
                    }}"#
                ),
            )
            .with_file(
                // Deliberately broken: every checked field is missing or invalid.
                "data/Sam/character.dat",
                format!(
                    r#"{{
                        "display_name": "",
                        "sex": "unknown",
                        "gender": 42,
                        "orientation": null,
                        "gender_sex_relationship": "maybe",
                        "emotional_state": "SMUG",
                        "relationship_thresholds": {THRESHOLDS}
                    }}"#
                ),
            )
            .with_file(
                "data/Jo/character.dat",
                r#"{"relationship_thresholds": {"HATE": -50, "LOVE": 50}}"#,
            )
            .with_file("data/relationships/Alex_Sam.dat", r#"{"score": 7}"#)
            .with_file("data/relationships/Alex_Jo.dat", r#"{"score": -5}"#)
    }

    #[test]
    fn init_from_file_validates_every_attribute() {
        let store = CharacterStore::with_source("data", bundle());

        let alex = store.init_from_file(&name("Alex")).unwrap();

        assert_eq!(alex.name(), &name("Alex"));
        assert_eq!(alex.display_name(), "Al");
        assert_eq!(alex.description(), Some("Runs the drone shop."));
        assert_eq!(alex.sex(), Sex::Male);
        assert_eq!(alex.gender(), Gender::Male);
        assert_eq!(alex.orientation(), Orientation::Gay);
        assert_eq!(alex.gender_sex_relationship(), GenderSexRelationship::Cis);
        assert_eq!(alex.emotional_state(), Some(Mood::Happy));
        assert_eq!(
            alex.relationship_thresholds().get(RelationshipState::Dislike),
            &serde_json::json!(-10)
        );
        assert!(alex.relationships().is_empty());
    }

    #[test]
    fn missing_and_invalid_fields_take_documented_defaults() {
        let store = CharacterStore::with_source("data", bundle());

        let sam = store.init_from_file(&name("Sam")).unwrap();

        assert_eq!(sam.display_name(), "Sam");
        assert_eq!(sam.description(), None);
        assert_eq!(sam.sex(), Sex::Other);
        assert_eq!(sam.gender(), Gender::Other);
        assert_eq!(sam.orientation(), Orientation::Other);
        assert_eq!(sam.gender_sex_relationship(), GenderSexRelationship::Other);
        assert_eq!(sam.emotional_state(), None);
    }

    #[test]
    fn incomplete_thresholds_abort_loading() {
        let store = CharacterStore::with_source("data", bundle());

        let error = store.init_from_file(&name("Jo")).unwrap_err();

        assert!(matches!(
            error,
            LoadError::Validation(ValidationError::IncompleteThresholds { .. })
        ));
    }

    #[test]
    fn missing_character_is_not_found() {
        let store = CharacterStore::with_source("data", bundle());

        let error = store.init_from_file(&name("Kim")).unwrap_err();

        assert!(matches!(
            error,
            LoadError::NotFound { path } if path == Path::new("data/Kim/character.dat")
        ));
    }

    #[test]
    fn malformed_character_file() {
        let store = CharacterStore::with_source(
            "data",
            Bundle::new().with_file("data/Kim/character.dat", "{\"display_name\": "),
        );

        let error = store.init_from_file(&name("Kim")).unwrap_err();

        assert!(matches!(error, LoadError::Malformed { .. }));
    }

    #[test]
    fn hand_crafted_character_gets_relationships_in_cast_order() {
        let store = CharacterStore::with_source("data", bundle());

        let alex = store.init_hand_crafted(&name("Alex"), &cast()).unwrap();

        let relationships: Vec<_> = alex
            .relationships()
            .iter()
            .map(|relationship| (relationship.name(), relationship.score()))
            .collect();
        assert_eq!(relationships, [("Alex_Sam", 7), ("Alex_Jo", -5)]);
    }

    #[test]
    fn hand_crafted_character_fails_without_relationship_files() {
        let store = CharacterStore::with_source("data", bundle());

        let error = store.init_hand_crafted(&name("Sam"), &cast()).unwrap_err();

        assert!(error.is_not_found());
    }

    #[test]
    fn blank_fallback_fills_missing_relationships() {
        let store = CharacterStore::with_source("data", bundle());

        let sam = store
            .init_hand_crafted_or_blank(&name("Sam"), &cast())
            .unwrap();

        assert_eq!(sam.relationships(), Relationship::blanks(&name("Sam"), &cast()));
    }

    #[test]
    fn save_and_load() {
        let tmp = TempDir::new().unwrap();
        let source = CharacterStore::with_source("data", bundle());
        let target = CharacterStore::new(tmp.path());

        for character in ["Alex", "Sam"] {
            let original = source.init_from_file(&name(character)).unwrap();

            let path = target.save(&original).unwrap();
            assert_eq!(path, tmp.path().join(character).join("character.dat"));

            let reloaded = target.init_from_file(&name(character)).unwrap();
            assert_eq!(reloaded, original);
        }
    }
}
