// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Inbound attribute messages.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::{AttributeId, Cluster};

/// Kind of inbound attribute message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageKind {
    /// Unsolicited report sent by the device.
    AttributeReport,
    /// Answer to a read request.
    ReadResponse,
}

/// Attribute values received from one endpoint.
///
/// The data object is keyed the same way as [`AttributeId::key`]; a key that
/// is missing means the attribute was not part of the message.
///
/// # Examples
///
/// ```
/// use ptvo_rc4::zcl::{attr, AttributeReport, Cluster, MessageKind};
///
/// let report = AttributeReport::new(Cluster::GenOnOff, MessageKind::AttributeReport, 6)
///     .with(attr::ON_OFF, 1);
///
/// assert!(report.contains(&attr::ON_OFF));
/// assert!(!report.contains(&attr::SWITCH_TYPE));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AttributeReport {
    cluster: Cluster,
    #[serde(rename = "type")]
    kind: MessageKind,
    endpoint: u8,
    #[serde(default)]
    data: Map<String, Value>,
}

impl AttributeReport {
    /// Creates an empty message from `endpoint`.
    #[must_use]
    pub fn new(cluster: Cluster, kind: MessageKind, endpoint: u8) -> Self {
        Self {
            cluster,
            kind,
            endpoint,
            data: Map::new(),
        }
    }

    /// Adds an attribute value.
    #[must_use]
    pub fn with(mut self, attribute: AttributeId, value: impl Into<Value>) -> Self {
        self.data.insert(attribute.key().into_owned(), value.into());
        self
    }

    /// Returns the cluster the message belongs to.
    #[must_use]
    pub const fn cluster(&self) -> Cluster {
        self.cluster
    }

    /// Returns the message kind.
    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Returns the id of the endpoint that sent the message.
    #[must_use]
    pub const fn endpoint(&self) -> u8 {
        self.endpoint
    }

    /// Returns the raw attribute object.
    #[must_use]
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Returns the raw value of an attribute.
    #[must_use]
    pub fn get(&self, attribute: &AttributeId) -> Option<&Value> {
        self.data.get(attribute.key().as_ref())
    }

    /// Returns `true` if the message carries `attribute`.
    #[must_use]
    pub fn contains(&self, attribute: &AttributeId) -> bool {
        self.data.contains_key(attribute.key().as_ref())
    }

    /// Decodes the attribute object into a typed view.
    ///
    /// Returns `None` when the values do not fit the view's types; such a
    /// message is treated as not applicable rather than as an error.
    #[must_use]
    pub fn decode<T: DeserializeOwned>(&self) -> Option<T> {
        match serde_json::from_value(Value::Object(self.data.clone())) {
            Ok(view) => Some(view),
            Err(e) => {
                tracing::debug!(
                    cluster = %self.cluster,
                    endpoint = self.endpoint,
                    error = %e,
                    "Ignoring message with unexpected attribute types"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::zcl::attr;

    #[derive(Debug, Deserialize)]
    struct OnOffView {
        #[serde(rename = "onOff", default)]
        on_off: Option<u8>,
    }

    #[test]
    fn deserialize_from_hub_json() {
        let report: AttributeReport = serde_json::from_value(json!({
            "cluster": "genOnOffSwitchCfg",
            "type": "readResponse",
            "endpoint": 2,
            "data": {"switchType": 1, "16385": 0}
        }))
        .unwrap();

        assert_eq!(report.cluster(), Cluster::GenOnOffSwitchCfg);
        assert_eq!(report.kind(), MessageKind::ReadResponse);
        assert_eq!(report.endpoint(), 2);
        assert_eq!(report.get(&attr::LINK_TO_OUTPUT), Some(&json!(0)));
        assert!(!report.contains(&attr::BIND_COMMAND));
    }

    #[test]
    fn decode_missing_attribute_as_none() {
        let report = AttributeReport::new(Cluster::GenOnOff, MessageKind::ReadResponse, 1);
        let view: OnOffView = report.decode().unwrap();
        assert_eq!(view.on_off, None);
    }

    #[test]
    fn decode_wrong_type_is_not_applicable() {
        let report = AttributeReport::new(Cluster::GenOnOff, MessageKind::ReadResponse, 1)
            .with(attr::ON_OFF, "yes");
        assert!(report.decode::<OnOffView>().is_none());
    }
}
