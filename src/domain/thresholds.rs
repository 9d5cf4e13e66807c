use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use super::enumeration::{Enumeration, RelationshipState};

/// The score boundary for every relationship state.
///
/// The mapping is kept exactly as written, including keys that name no state,
/// so saving a character writes its thresholds back unchanged. Validation
/// only requires that every [`RelationshipState`] has an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipThresholds {
    raw: Map<String, Value>,
    boundaries: [Value; 5],
}

impl RelationshipThresholds {
    /// Validates a raw `relationship_thresholds` attribute.
    ///
    /// The value must be an object with a key for every state, written as
    /// the state's label or integer code. Boundaries are not checked. If a
    /// state is named by more than one key, the last in key order wins.
    ///
    /// # Errors
    ///
    /// Fails if the value is not an object or if any state has no key.
    pub fn validate(value: &Value) -> Result<Self, ValidationError> {
        let raw = value.as_object().ok_or(ValidationError::MissingThresholds)?;

        let mut found: [Option<&Value>; 5] = [None; 5];
        for (key, boundary) in raw {
            let Some(state) = RelationshipState::from_key(key) else {
                tracing::debug!(key = key.as_str(), "key names no relationship state");
                continue;
            };
            found[index(state)] = Some(boundary);
        }

        let missing: Vec<_> = RelationshipState::ALL
            .iter()
            .copied()
            .filter(|&state| found[index(state)].is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::IncompleteThresholds { missing });
        }

        Ok(Self {
            raw: raw.clone(),
            boundaries: found.map(|boundary| boundary.cloned().unwrap_or_default()),
        })
    }

    /// Returns the boundary for a state, as written.
    #[must_use]
    pub const fn get(&self, state: RelationshipState) -> &Value {
        &self.boundaries[index(state)]
    }

    /// Iterates over states and their boundaries, from `HATE` to `LOVE`.
    pub fn iter(&self) -> impl Iterator<Item = (RelationshipState, &Value)> + '_ {
        RelationshipState::ALL
            .iter()
            .map(|&state| (state, self.get(state)))
    }
}

const fn index(state: RelationshipState) -> usize {
    match state {
        RelationshipState::Hate => 0,
        RelationshipState::Dislike => 1,
        RelationshipState::Neutral => 2,
        RelationshipState::Like => 3,
        RelationshipState::Love => 4,
    }
}

impl Serialize for RelationshipThresholds {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

/// Errors raised while validating character attributes.
///
/// Only relationship thresholds can fail validation; every other attribute
/// falls back to a default.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The thresholds are absent or not a mapping.
    #[error("relationship thresholds must be defined")]
    MissingThresholds,

    /// Some states have no threshold.
    #[error("relationship thresholds are missing {}", labels(.missing))]
    IncompleteThresholds {
        /// The states without a threshold.
        missing: Vec<RelationshipState>,
    },
}

fn labels(states: &[RelationshipState]) -> String {
    states
        .iter()
        .copied()
        .map(RelationshipState::label)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn complete() -> Value {
        json!({"HATE": -50, "DISLIKE": -10, "NEUTRAL": 0, "LIKE": 10, "LOVE": 50})
    }

    #[test]
    fn complete_thresholds_are_stored_unchanged() {
        let thresholds = RelationshipThresholds::validate(&complete()).unwrap();

        let stored: Vec<_> = thresholds.iter().collect();
        assert_eq!(
            stored,
            [
                (RelationshipState::Hate, &json!(-50)),
                (RelationshipState::Dislike, &json!(-10)),
                (RelationshipState::Neutral, &json!(0)),
                (RelationshipState::Like, &json!(10)),
                (RelationshipState::Love, &json!(50)),
            ]
        );
        assert_eq!(serde_json::to_value(thresholds).unwrap(), complete());
    }

    #[test]
    fn fractional_boundaries_are_accepted() {
        let value = json!({
            "HATE": -50.5,
            "DISLIKE": -10.25,
            "NEUTRAL": 0.5,
            "LIKE": 10.75,
            "LOVE": 50.5
        });

        let thresholds = RelationshipThresholds::validate(&value).unwrap();

        assert_eq!(thresholds.get(RelationshipState::Hate), &json!(-50.5));
        assert_eq!(thresholds.get(RelationshipState::Love), &json!(50.5));
        assert_eq!(serde_json::to_value(thresholds).unwrap(), value);
    }

    #[test]
    fn code_keys_and_unknown_keys_are_kept_as_written() {
        let value = json!({"-2": -50, "-1": -10, "0": 0, "1": 10, "2": 50, "ADORE": 99});

        let thresholds = RelationshipThresholds::validate(&value).unwrap();

        assert_eq!(thresholds.get(RelationshipState::Love), &json!(50));
        assert_eq!(thresholds.get(RelationshipState::Hate), &json!(-50));
        assert_eq!(serde_json::to_value(thresholds).unwrap(), value);
    }

    #[test]
    fn boundaries_are_not_checked() {
        let mut value = complete();
        value["LIKE"] = json!("ten");

        let thresholds = RelationshipThresholds::validate(&value).unwrap();

        assert_eq!(thresholds.get(RelationshipState::Like), &json!("ten"));
    }

    #[test]
    fn each_missing_state_is_reported() {
        for &state in RelationshipState::ALL {
            let mut value = complete();
            value.as_object_mut().unwrap().remove(state.label());

            assert_eq!(
                RelationshipThresholds::validate(&value),
                Err(ValidationError::IncompleteThresholds {
                    missing: vec![state]
                })
            );
        }
    }

    #[test]
    fn unknown_keys_do_not_stand_in_for_states() {
        let mut value = complete();
        value.as_object_mut().unwrap().remove("LOVE");
        value["ADORE"] = json!(50);

        assert_eq!(
            RelationshipThresholds::validate(&value),
            Err(ValidationError::IncompleteThresholds {
                missing: vec![RelationshipState::Love]
            })
        );
    }

    #[test]
    fn absent_or_non_object_thresholds_are_missing() {
        for value in [json!(null), json!([1, 2, 3, 4, 5]), json!("all of them")] {
            assert_eq!(
                RelationshipThresholds::validate(&value),
                Err(ValidationError::MissingThresholds)
            );
        }
    }

    #[test]
    fn missing_states_are_listed_in_message() {
        let error = RelationshipThresholds::validate(&json!({"HATE": 0, "LOVE": 1})).unwrap_err();
        assert_eq!(
            error.to_string(),
            "relationship thresholds are missing DISLIKE, NEUTRAL, LIKE"
        );
    }
}
