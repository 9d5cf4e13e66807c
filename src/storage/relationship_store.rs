use std::path::{Path, PathBuf};

use tracing::instrument;

use crate::{
    domain::{Attributes, CharacterName, Relationship},
    storage::{
        DataSource, FileSystem, LoadError, SaveError,
        json::{RelationshipRecord, read_attributes, write_record},
        relationship_path,
    },
};

/// Loads and saves relationship files under a data root.
#[derive(Debug, Clone)]
pub struct RelationshipStore<S = FileSystem> {
    /// The root of the directory the cast is stored in.
    root: PathBuf,
    source: S,
}

impl RelationshipStore {
    /// Opens a data root on the local filesystem.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_source(root, FileSystem)
    }
}

impl<S: DataSource> RelationshipStore<S> {
    /// Opens a data root read through the given source.
    #[must_use]
    pub fn with_source(root: impl Into<PathBuf>, source: S) -> Self {
        Self {
            root: root.into(),
            source,
        }
    }

    /// The data root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The source files are read from.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Reads the raw attributes of the relationship from `name` to `other`.
    ///
    /// Attributes missing from the file are `null`.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing or is not a JSON object.
    pub fn load(
        &self,
        name: &CharacterName,
        other: &CharacterName,
        attributes: &[&str],
    ) -> Result<Attributes, LoadError> {
        let path = relationship_path(&self.root, &Relationship::pair_name(name, other));
        read_attributes(&self.source, &path, attributes)
    }

    /// Loads the relationship from `name` to `other`.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing or is not a JSON object.
    #[instrument(level = "debug", skip_all, fields(%name, %other))]
    pub fn init_relationship(
        &self,
        name: &CharacterName,
        other: &CharacterName,
    ) -> Result<Relationship, LoadError> {
        let attributes: Vec<_> = Relationship::attributes().collect();
        let values = self.load(name, other, &attributes)?;
        Ok(Relationship::construct(
            Relationship::pair_name(name, other),
            &values,
        ))
    }

    /// Loads the relationship from `name` to `other`, or synthesizes a blank
    /// one if there is no file for the pair yet.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or is not a JSON object.
    pub fn init_relationship_or_blank(
        &self,
        name: &CharacterName,
        other: &CharacterName,
    ) -> Result<Relationship, LoadError> {
        match self.init_relationship(name, other) {
            Err(LoadError::NotFound { path }) => {
                tracing::debug!("No relationship file at {}, using blank", path.display());
                Ok(Relationship::blank(name, other))
            }
            result => result,
        }
    }

    /// Loads the relationships from `name` to everyone else in `cast`, in
    /// cast order.
    ///
    /// # Errors
    ///
    /// Fails on the first relationship that cannot be loaded.
    pub fn init_hand_crafted_relationships(
        &self,
        name: &CharacterName,
        cast: &[CharacterName],
    ) -> Result<Vec<Relationship>, LoadError> {
        name.others(cast)
            .map(|other| self.init_relationship(name, other))
            .collect()
    }

    /// Like [`Self::init_hand_crafted_relationships`], but pairs with no file
    /// get a blank relationship.
    ///
    /// # Errors
    ///
    /// Fails on the first relationship file that exists but cannot be loaded.
    pub fn init_relationships_or_blank(
        &self,
        name: &CharacterName,
        cast: &[CharacterName],
    ) -> Result<Vec<Relationship>, LoadError> {
        name.others(cast)
            .map(|other| self.init_relationship_or_blank(name, other))
            .collect()
    }

    /// Writes a relationship to its file, returning the path written.
    ///
    /// # Errors
    ///
    /// Fails if the source cannot be written to.
    pub fn save(&self, relationship: &Relationship) -> Result<PathBuf, SaveError> {
        let path = relationship_path(&self.root, relationship.name());
        write_record(&self.source, &path, &RelationshipRecord::from(relationship))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{
        domain::{Modifier, RelationshipState},
        storage::Bundle,
    };

    fn name(name: &str) -> CharacterName {
        name.parse().unwrap()
    }

    fn cast() -> Vec<CharacterName> {
        vec![name("Alex"), name("Sam"), name("Jo")]
    }

    fn bundle() -> Bundle {
        Bundle::new()
            .with_file(
                "data/relationships/Alex_Sam.dat",
                r#"{"ship_name": "Salex", "score": 12, "state": "LIKE", "modifier": "OPEN"}"#,
            )
            .with_file(
                "data/relationships/Alex_Jo.dat",
                r#"{"description": "Old rivals", "score": "lots", "state": 99}"#,
            )
    }

    #[test]
    fn init_relationship_reads_the_pair_file() {
        let store = RelationshipStore::with_source("data", bundle());

        let relationship = store
            .init_relationship(&name("Alex"), &name("Sam"))
            .unwrap();

        assert_eq!(relationship.name(), "Alex_Sam");
        assert_eq!(relationship.ship_name(), "Salex");
        assert_eq!(relationship.score(), 12);
        assert_eq!(relationship.state(), RelationshipState::Like);
        assert_eq!(relationship.modifier(), Modifier::Open);
    }

    #[test]
    fn invalid_fields_take_documented_defaults() {
        let store = RelationshipStore::with_source("data", bundle());

        let relationship = store.init_relationship(&name("Alex"), &name("Jo")).unwrap();

        assert_eq!(relationship.ship_name(), "Alex_Jo");
        assert_eq!(relationship.description(), Some("Old rivals"));
        assert_eq!(relationship.score(), 0);
        assert_eq!(relationship.state(), RelationshipState::Neutral);
        assert_eq!(relationship.modifier(), Modifier::Neutral);
    }

    #[test]
    fn hand_crafted_relationships_skip_self_in_cast_order() {
        let store = RelationshipStore::with_source("data", bundle());

        let relationships = store
            .init_hand_crafted_relationships(&name("Alex"), &cast())
            .unwrap();

        let names: Vec<_> = relationships.iter().map(Relationship::name).collect();
        assert_eq!(names, ["Alex_Sam", "Alex_Jo"]);
    }

    #[test]
    fn missing_pair_file_is_not_found() {
        let store = RelationshipStore::with_source("data", bundle());

        let error = store
            .init_hand_crafted_relationships(&name("Sam"), &cast())
            .unwrap_err();

        assert!(error.is_not_found());
    }

    #[test]
    fn missing_pair_file_can_fall_back_to_blank() {
        let store = RelationshipStore::with_source("data", bundle());

        let relationships = store
            .init_relationships_or_blank(&name("Sam"), &cast())
            .unwrap();

        assert_eq!(relationships, Relationship::blanks(&name("Sam"), &cast()));
    }

    #[test]
    fn malformed_pair_file_does_not_fall_back() {
        let store = RelationshipStore::with_source(
            "data",
            bundle().with_file("data/relationships/Sam_Alex.dat", "not json"),
        );

        let error = store
            .init_relationship_or_blank(&name("Sam"), &name("Alex"))
            .unwrap_err();

        assert!(matches!(error, LoadError::Malformed { .. }));
    }

    #[test]
    fn save_and_load() {
        let tmp = TempDir::new().unwrap();
        let store = RelationshipStore::new(tmp.path());
        let relationship = Relationship::blank(&name("Jo"), &name("Sam"));

        let path = store.save(&relationship).unwrap();
        assert_eq!(path, tmp.path().join("relationships").join("Jo_Sam.dat"));

        let loaded = store.init_relationship(&name("Jo"), &name("Sam")).unwrap();
        assert_eq!(loaded, relationship);
    }
}
