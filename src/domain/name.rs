use std::{fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;
use serde::{Serialize, Serializer};

/// The identifying name of a character.
///
/// Names double as directory names in a data root, so a valid name is
/// non-empty, contains no path separators, and is not `.` or `..`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CharacterName(NonEmptyString);

impl CharacterName {
    /// Creates a new `CharacterName`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidNameError`] if the name is empty, is `.` or `..`, or
    /// contains `/` or `\`.
    pub fn new(name: String) -> Result<Self, InvalidNameError> {
        if name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(InvalidNameError(name));
        }
        NonEmptyString::new(name).map(Self).map_err(InvalidNameError)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Iterates over every name in `cast` except this one, preserving order.
    pub fn others<'a>(&'a self, cast: &'a [Self]) -> impl Iterator<Item = &'a Self> {
        cast.iter().filter(move |other| *other != self)
    }
}

impl TryFrom<String> for CharacterName {
    type Error = InvalidNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CharacterName {
    type Error = InvalidNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl FromStr for CharacterName {
    type Err = InvalidNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl AsRef<str> for CharacterName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Deref for CharacterName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl PartialEq<str> for CharacterName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for CharacterName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for CharacterName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CharacterName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Error returned when a string is not usable as a character name.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("Invalid character name '{0}': must be non-empty and must not contain path separators")]
pub struct InvalidNameError(String);

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("Alex"; "simple")]
    #[test_case("Mary Jane"; "with space")]
    #[test_case("Zoë"; "non ascii")]
    #[test_case("..hidden"; "leading dots")]
    fn valid_names(name: &str) {
        let parsed = CharacterName::new(name.to_string()).unwrap();
        assert_eq!(parsed.as_str(), name);
    }

    #[test_case(""; "empty")]
    #[test_case("."; "current directory")]
    #[test_case(".."; "parent directory")]
    #[test_case("a/b"; "forward slash")]
    #[test_case("a\\b"; "backslash")]
    fn invalid_names(name: &str) {
        assert_eq!(
            CharacterName::new(name.to_string()),
            Err(InvalidNameError(name.to_string()))
        );
    }

    #[test]
    fn others_skips_self_and_keeps_order() {
        let cast: Vec<CharacterName> = ["Alex", "Sam", "Jo"]
            .into_iter()
            .map(|name| name.parse().unwrap())
            .collect();
        let alex = &cast[0];

        let others: Vec<&str> = alex.others(&cast).map(CharacterName::as_str).collect();
        assert_eq!(others, ["Sam", "Jo"]);
    }

    #[test]
    fn others_of_a_name_outside_the_cast_is_everyone() {
        let cast: Vec<CharacterName> = ["Sam", "Jo"]
            .into_iter()
            .map(|name| name.parse().unwrap())
            .collect();
        let alex: CharacterName = "Alex".parse().unwrap();

        assert_eq!(alex.others(&cast).count(), 2);
    }
}
