// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use serde_json::Value;

/// Builds a channel-qualified field name: `<prefix>_<channel>`.
#[must_use]
pub fn field_name(prefix: &str, channel: &str) -> String {
    format!("{prefix}_{channel}")
}

/// Value of one published field.
#[derive(Debug, Clone, PartialEq)]
pub enum StateValue {
    /// Binary sensor value.
    Bool(bool),
    /// Enumerated or textual value (`"ON"`, `"toggle"`, ...).
    Text(String),
    /// Measurement.
    Number(f64),
    /// The device reported a code this profile has no name for.
    ///
    /// Published as JSON `null` so the hub sees that the field was reported.
    Unknown,
}

impl StateValue {
    /// Returns the text value, if this is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean value, if this is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the numeric value, if this is one.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Converts the value to JSON.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(*b),
            Self::Text(s) => Value::String(s.clone()),
            Self::Number(n) => serde_json::Number::from_f64(*n).map_or(Value::Null, Value::Number),
            Self::Unknown => Value::Null,
        }
    }
}

impl From<bool> for StateValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for StateValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for StateValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for StateValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl<T: Into<StateValue>> From<Option<T>> for StateValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unknown, Into::into)
    }
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

impl Serialize for StateValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::Unknown => serializer.serialize_none(),
        }
    }
}

/// Fields produced from one or more reports, in the order they were set.
///
/// Setting a field that already exists replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublishedState {
    fields: Vec<(String, StateValue)>,
}

impl PublishedState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field.
    ///
    /// Returns `true` if the field was added or its value changed.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<StateValue>) -> bool {
        let name = name.into();
        let value = value.into();
        if let Some((_, existing)) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            if *existing == value {
                return false;
            }
            *existing = value;
        } else {
            self.fields.push((name, value));
        }
        true
    }

    /// Sets every field of `other`.
    ///
    /// Returns `true` if any field was added or changed.
    pub fn merge(&mut self, other: PublishedState) -> bool {
        let mut changed = false;
        for (name, value) in other.fields {
            changed |= self.insert(name, value);
        }
        changed
    }

    /// Returns a field value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StateValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Returns `true` if the field is set.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates over the fields.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StateValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Converts the state to a JSON object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(n, v)| (n.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl Serialize for PublishedState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<StateValue>> FromIterator<(K, V)> for PublishedState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut state = Self::new();
        for (name, value) in iter {
            state.insert(name, value);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn field_name_joins_prefix_and_channel() {
        assert_eq!(field_name("state", "l6"), "state_l6");
        assert_eq!(field_name("switch_type", "l1"), "switch_type_l1");
    }

    #[test]
    fn insert_reports_changes() {
        let mut state = PublishedState::new();
        assert!(state.insert("state_l1", "ON"));
        assert!(!state.insert("state_l1", "ON"));
        assert!(state.insert("state_l1", "OFF"));
        assert_eq!(state.len(), 1);
        assert_eq!(state.get("state_l1").and_then(StateValue::as_str), Some("OFF"));
    }

    #[test]
    fn merge_keeps_order_and_overwrites() {
        let mut state: PublishedState = [("a", 1.0), ("b", 2.0)].into_iter().collect();
        let other: PublishedState = [("b", 3.0), ("c", 4.0)].into_iter().collect();

        assert!(state.merge(other));
        let names: Vec<&str> = state.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(state.get("b").and_then(StateValue::as_f64), Some(3.0));
    }

    #[test]
    fn unknown_serializes_as_null() {
        let mut state = PublishedState::new();
        state.insert("bind_command_l1", StateValue::Unknown);
        state.insert("contact_l6", true);

        assert_eq!(
            serde_json::to_value(&state).unwrap(),
            json!({"bind_command_l1": null, "contact_l6": true})
        );
        assert_eq!(state.to_json(), json!({"bind_command_l1": null, "contact_l6": true}));
    }

    #[test]
    fn option_maps_none_to_unknown() {
        assert_eq!(StateValue::from(None::<&str>), StateValue::Unknown);
        assert_eq!(StateValue::from(Some("toggle")), StateValue::from("toggle"));
    }

    #[test]
    fn display() {
        assert_eq!(StateValue::from("ON").to_string(), "ON");
        assert_eq!(StateValue::from(false).to_string(), "false");
        assert_eq!(StateValue::Unknown.to_string(), "unknown");
    }
}
