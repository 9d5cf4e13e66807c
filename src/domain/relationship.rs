use serde::Serialize;
use serde_json::Value;

use super::{
    Attributes, CharacterName,
    attributes::{free_text, non_empty_text},
    enumeration::{Fallback, Modifier, RelationshipState},
};

/// How one character stands with another.
///
/// Relationships are directional: `Alex_Sam` is Alex's view of Sam, and is
/// stored separately from `Sam_Alex`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    name: String,
    ship_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    score: i64,
    state: RelationshipState,
    modifier: Modifier,
}

type Rule = fn(&mut Relationship, &Value);

/// Attribute validators, in the order they run.
const RULES: [(&str, Rule); 5] = [
    ("ship_name", validate_ship_name),
    ("description", validate_description),
    ("score", validate_score),
    ("state", validate_state),
    ("modifier", validate_modifier),
];

impl Relationship {
    /// The attribute names read from a relationship file.
    pub fn attributes() -> impl Iterator<Item = &'static str> {
        RULES.iter().map(|(attribute, _)| *attribute)
    }

    /// The identifier of the relationship from `name` to `other`.
    #[must_use]
    pub fn pair_name(name: &CharacterName, other: &CharacterName) -> String {
        format!("{name}_{other}")
    }

    /// Builds a relationship from raw attribute values.
    ///
    /// Never fails: unusable values are replaced with defaults.
    #[must_use]
    pub fn construct(name: impl Into<String>, values: &Attributes) -> Self {
        let name = name.into();
        let mut relationship = Self {
            ship_name: name.clone(),
            name,
            description: None,
            score: 0,
            state: RelationshipState::FALLBACK,
            modifier: Modifier::FALLBACK,
        };
        for (attribute, rule) in RULES {
            rule(&mut relationship, values.get(attribute));
        }
        relationship
    }

    /// A fresh, neutral relationship from `name` to `other`.
    ///
    /// Used for pairs that have no file yet.
    #[must_use]
    pub fn blank(name: &CharacterName, other: &CharacterName) -> Self {
        let pair_name = Self::pair_name(name, other);
        Self {
            ship_name: pair_name.clone(),
            name: pair_name,
            description: Some(format!(
                "A new relationship between {name} and {other}. Best watch it grow."
            )),
            score: 0,
            state: RelationshipState::Neutral,
            modifier: Modifier::Neutral,
        }
    }

    /// Blank relationships from `name` to everyone else in `cast`, in cast
    /// order.
    #[must_use]
    pub fn blanks(name: &CharacterName, cast: &[CharacterName]) -> Vec<Self> {
        name.others(cast).map(|other| Self::blank(name, other)).collect()
    }

    /// The pair identifier, `<name>_<other>`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The label shown for the pairing.
    #[must_use]
    pub fn ship_name(&self) -> &str {
        &self.ship_name
    }

    /// Free-text description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The relationship score.
    #[must_use]
    pub const fn score(&self) -> i64 {
        self.score
    }

    /// The relationship state.
    #[must_use]
    pub const fn state(&self) -> RelationshipState {
        self.state
    }

    /// The commitment modifier.
    #[must_use]
    pub const fn modifier(&self) -> Modifier {
        self.modifier
    }
}

fn validate_ship_name(relationship: &mut Relationship, value: &Value) {
    relationship.ship_name =
        non_empty_text(value).map_or_else(|| relationship.name.clone(), str::to_string);
}

fn validate_description(relationship: &mut Relationship, value: &Value) {
    relationship.description = free_text(value);
}

fn validate_score(relationship: &mut Relationship, value: &Value) {
    relationship.score = value.as_i64().unwrap_or_else(|| {
        tracing::debug!(%value, "score is not an integer, using 0");
        0
    });
}

fn validate_state(relationship: &mut Relationship, value: &Value) {
    relationship.state = RelationshipState::coerce(value);
}

fn validate_modifier(relationship: &mut Relationship, value: &Value) {
    relationship.modifier = Modifier::coerce(value);
}
