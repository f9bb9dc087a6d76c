// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outbound attribute payloads.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use serde_json::Value;

use super::{AttributeId, DataType};

/// A value to write to one attribute.
///
/// Schema attributes carry their type implicitly. Vendor attributes do not,
/// so their value must travel with an explicit [`DataType`] tag.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteValue {
    /// Value for an attribute whose type is known from the cluster schema.
    Plain(Value),
    /// Value with an explicit type tag.
    Typed {
        /// The raw value.
        value: Value,
        /// The ZCL type to encode it as.
        data_type: DataType,
    },
}

impl WriteValue {
    /// Creates an untagged value.
    #[must_use]
    pub fn plain(value: impl Into<Value>) -> Self {
        Self::Plain(value.into())
    }

    /// Creates a value tagged with `data_type`.
    #[must_use]
    pub fn typed(value: impl Into<Value>, data_type: DataType) -> Self {
        Self::Typed {
            value: value.into(),
            data_type,
        }
    }

    /// Returns the raw value.
    #[must_use]
    pub fn value(&self) -> &Value {
        match self {
            Self::Plain(value) | Self::Typed { value, .. } => value,
        }
    }

    /// Returns the explicit type tag, if any.
    #[must_use]
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Self::Plain(_) => None,
            Self::Typed { data_type, .. } => Some(*data_type),
        }
    }
}

impl Serialize for WriteValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Plain(value) => value.serialize(serializer),
            Self::Typed { value, data_type } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("value", value)?;
                map.serialize_entry("type", data_type)?;
                map.end()
            }
        }
    }
}

/// Attribute values for one write request, in insertion order.
///
/// # Examples
///
/// ```
/// use ptvo_rc4::zcl::{attr, DataType, WritePayload, WriteValue};
///
/// let payload = WritePayload::single(attr::LINK_TO_OUTPUT, WriteValue::typed(1, DataType::Uint8));
/// let json = serde_json::to_string(&payload).unwrap();
/// assert_eq!(json, r#"{"16385":{"value":1,"type":32}}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WritePayload {
    entries: Vec<(AttributeId, WriteValue)>,
}

impl WritePayload {
    /// Creates an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a payload for a single attribute.
    #[must_use]
    pub fn single(attribute: AttributeId, value: WriteValue) -> Self {
        Self::new().with(attribute, value)
    }

    /// Sets an attribute value, replacing any previous one.
    #[must_use]
    pub fn with(mut self, attribute: AttributeId, value: WriteValue) -> Self {
        self.entries.retain(|(a, _)| *a != attribute);
        self.entries.push((attribute, value));
        self
    }

    /// Returns the value written to `attribute`.
    #[must_use]
    pub fn get(&self, attribute: &AttributeId) -> Option<&WriteValue> {
        self.entries
            .iter()
            .find(|(a, _)| a == attribute)
            .map(|(_, v)| v)
    }

    /// Iterates over the written attributes.
    pub fn iter(&self) -> impl Iterator<Item = (&AttributeId, &WriteValue)> {
        self.entries.iter().map(|(a, v)| (a, v))
    }

    /// Returns the number of attributes written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for WritePayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (attribute, value) in &self.entries {
            map.serialize_entry(&attribute.key(), value)?;
        }
        map.end()
    }
}

/// Reporting interval configuration for one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingConfig {
    /// The attribute to report.
    pub attribute: AttributeId,
    /// Minimum interval between reports, in seconds.
    pub minimum_report_interval: u16,
    /// Maximum interval between reports, in seconds.
    pub maximum_report_interval: u16,
    /// Change that triggers a report before the maximum interval.
    pub reportable_change: u32,
}

impl ReportingConfig {
    /// Reports `attribute` at a fixed interval, regardless of change.
    #[must_use]
    pub const fn fixed_interval(attribute: AttributeId, seconds: u16) -> Self {
        Self {
            attribute,
            minimum_report_interval: seconds,
            maximum_report_interval: seconds,
            reportable_change: 0,
        }
    }
}
