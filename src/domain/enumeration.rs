use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// A small fixed set of named values.
///
/// Every variant has a stable integer code, which is how older data files
/// encode it, and an upper-case label, which is how it is written today.
pub trait Enumeration: Sized + Copy + 'static {
    /// Every variant, in code order.
    const ALL: &'static [Self];

    /// The integer code for this variant.
    #[must_use]
    fn code(self) -> i64;

    /// The upper-case label for this variant.
    #[must_use]
    fn label(self) -> &'static str;

    /// Looks up a variant by its integer code.
    #[must_use]
    fn from_code(code: i64) -> Option<Self> {
        Self::ALL.iter().copied().find(|variant| variant.code() == code)
    }

    /// Looks up a variant by its label.
    ///
    /// Matching ignores ASCII case and surrounding whitespace.
    #[must_use]
    fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|variant| variant.label().eq_ignore_ascii_case(label))
    }

    /// Interprets a raw attribute value.
    ///
    /// Integers are read as codes and strings as labels. Anything else,
    /// including `null`, yields `None`.
    #[must_use]
    fn parse(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number.as_i64().and_then(Self::from_code),
            Value::String(label) => Self::from_label(label),
            _ => None,
        }
    }
}

/// An [`Enumeration`] with a designated catch-all variant.
pub trait Fallback: Enumeration {
    /// The variant substituted for unrecognised input.
    const FALLBACK: Self;

    /// Interprets a raw attribute value, substituting [`Self::FALLBACK`] for
    /// anything unrecognised.
    #[must_use]
    fn coerce(value: &Value) -> Self {
        Self::parse(value).unwrap_or_else(|| {
            tracing::debug!(
                %value,
                fallback = Self::FALLBACK.label(),
                "unrecognised value, using fallback"
            );
            Self::FALLBACK
        })
    }
}

macro_rules! enumeration {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $code:literal => $label:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
        )]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
        }

        impl Enumeration for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn code(self) -> i64 {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

enumeration! {
    /// A five-point mood scale.
    pub enum Mood {
        /// Angry.
        Angry = -2 => "ANGRY",
        /// Dissatisfied.
        Dissatisfied = -1 => "DISSATISFIED",
        /// Neither pleased nor displeased.
        Neutral = 0 => "NEUTRAL",
        /// Satisfied.
        Satisfied = 1 => "SATISFIED",
        /// Happy.
        Happy = 2 => "HAPPY",
    }
}

enumeration! {
    /// Gender identity.
    pub enum Gender {
        /// Male.
        Male = 0 => "MALE",
        /// Female.
        Female = 1 => "FEMALE",
        /// Gender fluid.
        Fluid = 2 => "FLUID",
        /// Genderqueer.
        Queer = 3 => "QUEER",
        /// Anything else, or unknown.
        Other = 4 => "OTHER",
    }
}

enumeration! {
    /// Sex.
    pub enum Sex {
        /// Male.
        Male = 0 => "MALE",
        /// Female.
        Female = 1 => "FEMALE",
        /// Intersex.
        Intersex = 2 => "INTERSEX",
        /// Anything else, or unknown.
        Other = 3 => "OTHER",
    }
}

enumeration! {
    /// Sexual orientation.
    pub enum Orientation {
        /// Straight.
        Straight = 0 => "STRAIGHT",
        /// Gay.
        Gay = 1 => "GAY",
        /// Bisexual.
        Bi = 2 => "BI",
        /// Asexual.
        Asexual = 3 => "ASEXUAL",
        /// Anything else, or unknown.
        Other = 4 => "OTHER",
    }
}

enumeration! {
    /// How a character's gender relates to their sex.
    pub enum GenderSexRelationship {
        /// Gender matches sex.
        Cis = 0 => "CIS",
        /// Gender differs from sex.
        Trans = 1 => "TRANS",
        /// Anything else, or not determinable.
        Other = 2 => "OTHER",
    }
}

enumeration! {
    /// A five-point scale of how one character feels about another.
    pub enum RelationshipState {
        /// Hate.
        Hate = -2 => "HATE",
        /// Dislike.
        Dislike = -1 => "DISLIKE",
        /// Indifference.
        Neutral = 0 => "NEUTRAL",
        /// Like.
        Like = 1 => "LIKE",
        /// Love.
        Love = 2 => "LOVE",
    }
}

enumeration! {
    /// The kind of commitment in a relationship.
    pub enum Modifier {
        /// No particular arrangement.
        Neutral = 0 => "NEUTRAL",
        /// An open relationship.
        Open = 1 => "OPEN",
        /// A committed relationship.
        Committed = 2 => "COMMITTED",
    }
}

impl Fallback for Gender {
    const FALLBACK: Self = Self::Other;
}

impl Fallback for Sex {
    const FALLBACK: Self = Self::Other;
}

impl Fallback for Orientation {
    const FALLBACK: Self = Self::Other;
}

impl Fallback for GenderSexRelationship {
    const FALLBACK: Self = Self::Other;
}

impl Fallback for RelationshipState {
    const FALLBACK: Self = Self::Neutral;
}

impl Fallback for Modifier {
    const FALLBACK: Self = Self::Neutral;
}

impl GenderSexRelationship {
    /// Derives the relationship from sex and gender.
    ///
    /// Only binary sex and gender give a definite answer: equal values are
    /// [`Self::Cis`], unequal values [`Self::Trans`]. Everything else is
    /// [`Self::Other`].
    #[must_use]
    pub const fn derive(sex: Sex, gender: Gender) -> Self {
        match (sex, gender) {
            (Sex::Male, Gender::Male) | (Sex::Female, Gender::Female) => Self::Cis,
            (Sex::Male, Gender::Female) | (Sex::Female, Gender::Male) => Self::Trans,
            _ => Self::Other,
        }
    }
}

impl RelationshipState {
    /// Parses a mapping key naming a state.
    ///
    /// Keys are either labels (`"LOVE"`) or integer codes (`"2"`), since JSON
    /// object keys are always strings.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::from_label(key).or_else(|| key.trim().parse().ok().and_then(Self::from_code))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use test_case::test_case;

    use super::*;

    #[test_case(&json!("MALE"), Sex::Male; "label")]
    #[test_case(&json!(" female "), Sex::Female; "label ignores case and whitespace")]
    #[test_case(&json!(2), Sex::Intersex; "integer code")]
    #[test_case(&json!("unknown"), Sex::Other; "unknown label")]
    #[test_case(&json!(17), Sex::Other; "unknown code")]
    #[test_case(&json!(1.0), Sex::Other; "float")]
    #[test_case(&json!(null), Sex::Other; "null")]
    #[test_case(&json!(["MALE"]), Sex::Other; "array")]
    fn sex_coercion(value: &Value, expected: Sex) {
        assert_eq!(Sex::coerce(value), expected);
    }

    #[test_case(&json!("QUEER"), Gender::Queer)]
    #[test_case(&json!(2), Gender::Fluid)]
    #[test_case(&json!("INTERSEX"), Gender::Other)]
    #[test_case(&json!(true), Gender::Other)]
    fn gender_coercion(value: &Value, expected: Gender) {
        assert_eq!(Gender::coerce(value), expected);
    }

    #[test_case(&json!("bi"), Orientation::Bi)]
    #[test_case(&json!(3), Orientation::Asexual)]
    #[test_case(&json!("pan"), Orientation::Other)]
    #[test_case(&json!(-1), Orientation::Other)]
    fn orientation_coercion(value: &Value, expected: Orientation) {
        assert_eq!(Orientation::coerce(value), expected);
    }

    #[test_case(&json!(99), RelationshipState::Neutral; "out of range code")]
    #[test_case(&json!(-2), RelationshipState::Hate; "negative code")]
    #[test_case(&json!("LOVE"), RelationshipState::Love; "label")]
    #[test_case(&json!({}), RelationshipState::Neutral; "object")]
    fn state_coercion(value: &Value, expected: RelationshipState) {
        assert_eq!(RelationshipState::coerce(value), expected);
    }

    #[test_case(&json!("OPEN"), Modifier::Open)]
    #[test_case(&json!(2), Modifier::Committed)]
    #[test_case(&json!("POLY"), Modifier::Neutral)]
    fn modifier_coercion(value: &Value, expected: Modifier) {
        assert_eq!(Modifier::coerce(value), expected);
    }

    #[test_case(Sex::Male, Gender::Male, GenderSexRelationship::Cis; "male male")]
    #[test_case(Sex::Female, Gender::Female, GenderSexRelationship::Cis; "female female")]
    #[test_case(Sex::Male, Gender::Female, GenderSexRelationship::Trans; "male female")]
    #[test_case(Sex::Female, Gender::Male, GenderSexRelationship::Trans; "female male")]
    #[test_case(Sex::Intersex, Gender::Fluid, GenderSexRelationship::Other; "intersex fluid")]
    #[test_case(Sex::Male, Gender::Queer, GenderSexRelationship::Other; "male queer")]
    #[test_case(Sex::Other, Gender::Female, GenderSexRelationship::Other; "other female")]
    fn gender_sex_relationship_derivation(
        sex: Sex,
        gender: Gender,
        expected: GenderSexRelationship,
    ) {
        assert_eq!(GenderSexRelationship::derive(sex, gender), expected);
    }

    #[test]
    fn mood_codes_span_the_scale() {
        let codes: Vec<_> = Mood::ALL.iter().copied().map(Mood::code).collect();
        assert_eq!(codes, [-2, -1, 0, 1, 2]);
    }

    #[test]
    fn state_keys_accept_labels_and_codes() {
        assert_eq!(RelationshipState::from_key("hate"), Some(RelationshipState::Hate));
        assert_eq!(RelationshipState::from_key("-1"), Some(RelationshipState::Dislike));
        assert_eq!(RelationshipState::from_key("3"), None);
        assert_eq!(RelationshipState::from_key("meh"), None);
    }

    #[test]
    fn labels_match_serialized_form() {
        for state in RelationshipState::ALL {
            let serialized = serde_json::to_value(state).unwrap();
            assert_eq!(serialized, json!(state.label()));
        }
        assert_eq!(serde_json::to_value(Orientation::Bi).unwrap(), json!("BI"));
    }
}
