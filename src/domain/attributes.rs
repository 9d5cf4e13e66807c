use serde_json::{Map, Value};

static NULL: Value = Value::Null;

/// Raw attribute values read from a data file, keyed by attribute name.
///
/// Looking up an attribute that was never set yields `null` rather than an
/// error; validators decide what an absent value means.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Map<String, Value>);

impl Attributes {
    /// Creates an empty set of attributes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks the named attributes out of a decoded JSON object.
    ///
    /// Every requested name is present in the result; names missing from
    /// `object` map to `null`. Keys that were not requested are dropped.
    #[must_use]
    pub fn select(mut object: Map<String, Value>, names: &[&str]) -> Self {
        names
            .iter()
            .map(|&name| (name.to_string(), object.remove(name).unwrap_or(Value::Null)))
            .collect()
    }

    /// Returns the value of an attribute, or `null` if it is not set.
    #[must_use]
    pub fn get(&self, name: &str) -> &Value {
        self.0.get(name).unwrap_or(&NULL)
    }

    /// Sets an attribute, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Iterates over attribute names and values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl FromIterator<(String, Value)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Map<String, Value>> for Attributes {
    fn from(object: Map<String, Value>) -> Self {
        Self(object)
    }
}

/// Reads a non-empty string, or `None` for anything else.
pub fn non_empty_text(value: &Value) -> Option<&str> {
    value.as_str().filter(|text| !text.is_empty())
}

/// Free text passes through unchecked.
///
/// Strings are kept verbatim and other non-null values keep their JSON text.
pub fn free_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
