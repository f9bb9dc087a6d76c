// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Channel naming for multi-endpoint devices.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Returns the conventional channel name (`l<endpoint>`) for an endpoint id.
///
/// # Examples
///
/// ```
/// assert_eq!(ptvo_rc4::types::channel_name(6), "l6");
/// ```
#[must_use]
pub fn channel_name(endpoint: u8) -> String {
    format!("l{endpoint}")
}

/// Static mapping between channel names and numeric endpoint ids.
///
/// The table is fixed by the firmware configuration; it is looked up in both
/// directions, name to id for outbound requests and id to name for reports.
///
/// # Examples
///
/// ```
/// use ptvo_rc4::types::EndpointTable;
///
/// let table: EndpointTable = [("l1", 1), ("l6", 6)].into_iter().collect();
///
/// assert_eq!(table.id_of("l6"), Some(6));
/// assert_eq!(table.name_of(1), Some("l1"));
/// assert_eq!(table.name_of(5), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointTable {
    entries: Vec<(String, u8)>,
}

impl EndpointTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a channel, replacing any previous mapping for the same name.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, endpoint: u8) -> Self {
        let name = name.into();
        self.entries.retain(|(n, _)| *n != name);
        self.entries.push((name, endpoint));
        self
    }

    /// Returns the endpoint id for a channel name.
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<u8> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, id)| id)
    }

    /// Returns the first channel name mapped to an endpoint id.
    #[must_use]
    pub fn name_of(&self, endpoint: u8) -> Option<&str> {
        self.entries
            .iter()
            .find(|&&(_, id)| id == endpoint)
            .map(|(n, _)| n.as_str())
    }

    /// Iterates over `(name, endpoint)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.entries.iter().map(|(n, id)| (n.as_str(), *id))
    }

    /// Returns the number of channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no channel is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u8)> for EndpointTable {
    fn from_iter<I: IntoIterator<Item = (S, u8)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |table, (name, id)| table.with(name, id))
    }
}

impl Serialize for EndpointTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, id) in &self.entries {
            map.serialize_entry(name, id)?;
        }
        map.end()
    }
}

impl fmt::Display for EndpointTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|(name, id)| format!("{name}={id}"))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}
