use serde::Serialize;
use serde_json::Value;

use super::{
    Attributes, CharacterName, Relationship, RelationshipThresholds, ValidationError,
    attributes::{free_text, non_empty_text},
    enumeration::{Enumeration, Fallback, Gender, GenderSexRelationship, Mood, Orientation, Sex},
};

/// A member of the cast.
///
/// Every attribute is validated at construction. Unrecognised enumerated
/// values fall back to their catch-all variant; only missing relationship
/// thresholds make construction fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Character {
    name: CharacterName,
    display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    sex: Sex,
    gender: Gender,
    orientation: Orientation,
    gender_sex_relationship: GenderSexRelationship,
    #[serde(skip_serializing_if = "Option::is_none")]
    emotional_state: Option<Mood>,
    relationship_thresholds: RelationshipThresholds,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    relationships: Vec<Relationship>,
}

/// Validates one raw attribute value and records the result on the draft.
type Rule = fn(&mut Draft, &Value);

/// Attribute validators, in the order they run.
///
/// `gender_sex_relationship` is derived from `sex` and `gender` when it is
/// not given, so it must come after both.
const RULES: [(&str, Rule); 8] = [
    ("display_name", validate_display_name),
    ("description", validate_description),
    ("sex", validate_sex),
    ("gender", validate_gender),
    ("orientation", validate_orientation),
    ("gender_sex_relationship", validate_gender_sex_relationship),
    ("emotional_state", validate_emotional_state),
    ("relationship_thresholds", validate_relationship_thresholds),
];

impl Character {
    /// The attribute names read from a character file.
    pub fn attributes() -> impl Iterator<Item = &'static str> {
        RULES.iter().map(|(attribute, _)| *attribute)
    }

    /// Builds a character from raw attribute values.
    ///
    /// Each attribute is run through its validator. Attributes missing from
    /// `values` are treated as `null`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the relationship thresholds are
    /// missing or do not name every relationship state.
    pub fn construct(name: CharacterName, values: &Attributes) -> Result<Self, ValidationError> {
        let mut draft = Draft::new(name);
        for (attribute, rule) in RULES {
            rule(&mut draft, values.get(attribute));
        }
        draft.finish()
    }

    /// Attaches relationships to the character, replacing any it had.
    #[must_use]
    pub fn with_relationships(mut self, relationships: Vec<Relationship>) -> Self {
        self.relationships = relationships;
        self
    }

    /// The identifying name.
    #[must_use]
    pub const fn name(&self) -> &CharacterName {
        &self.name
    }

    /// The name shown to the player.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Free-text description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Sex, or [`Sex::Other`] if unknown.
    #[must_use]
    pub const fn sex(&self) -> Sex {
        self.sex
    }

    /// Gender identity, or [`Gender::Other`] if unknown.
    #[must_use]
    pub const fn gender(&self) -> Gender {
        self.gender
    }

    /// Orientation, or [`Orientation::Other`] if unknown.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Whether the character's gender matches their sex.
    #[must_use]
    pub const fn gender_sex_relationship(&self) -> GenderSexRelationship {
        self.gender_sex_relationship
    }

    /// Current mood, if a recognised one was given.
    #[must_use]
    pub const fn emotional_state(&self) -> Option<Mood> {
        self.emotional_state
    }

    /// Score boundaries used to map relationship scores onto states.
    #[must_use]
    pub const fn relationship_thresholds(&self) -> &RelationshipThresholds {
        &self.relationship_thresholds
    }

    /// Relationships with the rest of the cast, in cast order.
    ///
    /// Empty unless the character was loaded as hand-crafted.
    #[must_use]
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Finds this character's relationship with `other`.
    #[must_use]
    pub fn relationship_with(&self, other: &CharacterName) -> Option<&Relationship> {
        let name = Relationship::pair_name(&self.name, other);
        self.relationships
            .iter()
            .find(|relationship| relationship.name() == name)
    }
}

/// A character under construction.
///
/// Holds defaults until the matching rule has run. Threshold failures are
/// kept until [`Draft::finish`].
#[derive(Debug)]
struct Draft {
    name: CharacterName,
    display_name: String,
    description: Option<String>,
    sex: Sex,
    gender: Gender,
    orientation: Orientation,
    gender_sex_relationship: GenderSexRelationship,
    emotional_state: Option<Mood>,
    relationship_thresholds: Result<RelationshipThresholds, ValidationError>,
}

impl Draft {
    fn new(name: CharacterName) -> Self {
        Self {
            display_name: name.to_string(),
            name,
            description: None,
            sex: Sex::FALLBACK,
            gender: Gender::FALLBACK,
            orientation: Orientation::FALLBACK,
            gender_sex_relationship: GenderSexRelationship::FALLBACK,
            emotional_state: None,
            relationship_thresholds: Err(ValidationError::MissingThresholds),
        }
    }

    fn finish(self) -> Result<Character, ValidationError> {
        let relationship_thresholds = self.relationship_thresholds?;

        Ok(Character {
            name: self.name,
            display_name: self.display_name,
            description: self.description,
            sex: self.sex,
            gender: self.gender,
            orientation: self.orientation,
            gender_sex_relationship: self.gender_sex_relationship,
            emotional_state: self.emotional_state,
            relationship_thresholds,
            relationships: Vec::new(),
        })
    }
}

fn validate_display_name(draft: &mut Draft, value: &Value) {
    draft.display_name =
        non_empty_text(value).map_or_else(|| draft.name.to_string(), str::to_string);
}

fn validate_description(draft: &mut Draft, value: &Value) {
    draft.description = free_text(value);
}

fn validate_sex(draft: &mut Draft, value: &Value) {
    draft.sex = Sex::coerce(value);
}

fn validate_gender(draft: &mut Draft, value: &Value) {
    draft.gender = Gender::coerce(value);
}

fn validate_orientation(draft: &mut Draft, value: &Value) {
    draft.orientation = Orientation::coerce(value);
}

fn validate_gender_sex_relationship(draft: &mut Draft, value: &Value) {
    draft.gender_sex_relationship = GenderSexRelationship::parse(value)
        .unwrap_or_else(|| GenderSexRelationship::derive(draft.sex, draft.gender));
}

fn validate_emotional_state(draft: &mut Draft, value: &Value) {
    draft.emotional_state = Mood::parse(value);
}

fn validate_relationship_thresholds(draft: &mut Draft, value: &Value) {
    draft.relationship_thresholds = RelationshipThresholds::validate(value);
}
