// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device definitions.
//!
//! A [`DeviceDefinition`] ties a Zigbee model id to its converters, its
//! exposed capabilities and its endpoint naming. The hub hands every report
//! of a matching device to [`DeviceDefinition::convert_report`] and every
//! option change to [`DeviceDefinition::set`] or [`DeviceDefinition::get`].
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use ptvo_rc4::converter::LegacyButtons;
//! use ptvo_rc4::definition::DeviceDefinition;
//!
//! let definition = DeviceDefinition::ptvo_rc4(Arc::new(LegacyButtons));
//!
//! assert_eq!(definition.model(), "ptvo.rc4");
//! assert_eq!(definition.resolve_key("switch_type_l2"), ("switch_type", Some(2)));
//! ```

mod ptvo_rc4;

pub use ptvo_rc4::switch_config_exposes;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::converter::{ConvertContext, Entity, FromZigbee, ToZigbee, dispatch};
use crate::error::{ConvertError, Result};
use crate::exposes::{Access, Expose};
use crate::state::PublishedState;
use crate::types::EndpointTable;
use crate::zcl::{AttributeReport, DeviceInfo, ZclRequest};

/// Static metadata of a device model.
///
/// Stored by the hub in camelCase, e.g.
/// `{"multiEndpoint": true, "binaryEndpoints": {"l6": "contact"}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceMeta {
    /// Options and actions are addressed per channel (`switch_type_l2`).
    pub multi_endpoint: bool,
    /// Channels that are raw binary inputs, mapped to the prefix of their
    /// published field.
    pub binary_endpoints: BTreeMap<String, String>,
}

impl DeviceMeta {
    /// Sets whether the device addresses options per channel.
    #[must_use]
    pub fn with_multi_endpoint(mut self, multi_endpoint: bool) -> Self {
        self.multi_endpoint = multi_endpoint;
        self
    }

    /// Marks `channel` as a binary input published as `<prefix>_<channel>`.
    #[must_use]
    pub fn with_binary_endpoint(
        mut self,
        channel: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        self.binary_endpoints.insert(channel.into(), prefix.into());
        self
    }

    /// Returns the binary prefix of `channel`, if it is a binary input.
    #[must_use]
    pub fn binary_prefix(&self, channel: &str) -> Option<&str> {
        self.binary_endpoints
            .get(channel)
            .map(String::as_str)
            .filter(|prefix| !prefix.is_empty())
    }
}

/// Everything the hub needs to know to drive one device model.
#[derive(Debug, Clone)]
pub struct DeviceDefinition {
    zigbee_model: Vec<String>,
    model: String,
    vendor: String,
    description: String,
    from_zigbee: Vec<Arc<dyn FromZigbee>>,
    to_zigbee: Vec<Arc<dyn ToZigbee>>,
    exposes: Vec<Expose>,
    meta: DeviceMeta,
    endpoints: EndpointTable,
    icon: Option<String>,
}

impl DeviceDefinition {
    /// Starts a definition for the given model id.
    #[must_use]
    pub fn builder(model: impl Into<String>) -> DefinitionBuilder {
        DefinitionBuilder::new(model)
    }

    /// Model ids reported by the device in `genBasic`.
    #[must_use]
    pub fn zigbee_model(&self) -> &[String] {
        &self.zigbee_model
    }

    /// Returns the model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the vendor name.
    #[must_use]
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// Returns the description (Markdown).
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the inbound converters in the order they run.
    #[must_use]
    pub fn from_zigbee(&self) -> &[Arc<dyn FromZigbee>] {
        &self.from_zigbee
    }

    /// Returns the outbound converters in lookup order.
    #[must_use]
    pub fn to_zigbee(&self) -> &[Arc<dyn ToZigbee>] {
        &self.to_zigbee
    }

    /// Returns the exposed capabilities.
    #[must_use]
    pub fn exposes(&self) -> &[Expose] {
        &self.exposes
    }

    /// Returns the model metadata.
    #[must_use]
    pub fn meta(&self) -> &DeviceMeta {
        &self.meta
    }

    /// Returns the channel name table.
    #[must_use]
    pub fn endpoints(&self) -> &EndpointTable {
        &self.endpoints
    }

    /// Returns the icon as a data URI.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Builds the conversion context for a paired device.
    #[must_use]
    pub fn context<'a>(&'a self, device: &'a DeviceInfo) -> ConvertContext<'a> {
        ConvertContext {
            meta: &self.meta,
            endpoints: &self.endpoints,
            device,
        }
    }

    /// Runs every matching inbound converter on `report` and merges their
    /// fields in registration order.
    #[must_use]
    pub fn convert_report(&self, device: &DeviceInfo, report: &AttributeReport) -> PublishedState {
        let ctx = self.context(device);
        let mut state = PublishedState::new();
        for converter in self.from_zigbee.iter().filter(|c| c.matches(report)) {
            match converter.convert(&ctx, report) {
                Some(fields) => {
                    state.merge(fields);
                }
                None => tracing::trace!(
                    converter = converter.name(),
                    endpoint = report.endpoint(),
                    "Converter produced nothing"
                ),
            }
        }
        state
    }

    /// Splits an option key into its base key and the endpoint it addresses.
    ///
    /// On multi-endpoint devices `switch_type_l2` addresses `switch_type` on
    /// the endpoint named `l2`. Keys without a known channel suffix address
    /// the default endpoint (`None`).
    #[must_use]
    pub fn resolve_key<'k>(&self, key: &'k str) -> (&'k str, Option<u8>) {
        if self.meta.multi_endpoint
            && let Some((base, channel)) = key.rsplit_once('_')
            && let Some(endpoint) = self.endpoints.id_of(channel)
        {
            return (base, Some(endpoint));
        }
        (key, None)
    }

    /// Returns the outbound converter handling `key`.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::UnsupportedKey` if no converter handles it.
    pub fn find_to_zigbee(&self, key: &str) -> Result<&dyn ToZigbee> {
        self.to_zigbee
            .iter()
            .find(|c| c.handles(key))
            .map(AsRef::as_ref)
            .ok_or_else(|| ConvertError::UnsupportedKey(key.to_string()).into())
    }

    /// Builds the requests that apply `value` to `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unsupported or the value invalid.
    pub fn set_requests(
        &self,
        device: &DeviceInfo,
        key: &str,
        value: &Value,
    ) -> Result<Vec<ZclRequest>> {
        let (base, endpoint) = self.resolve_key(key);
        let endpoint = endpoint.unwrap_or_else(|| device.default_endpoint());
        let converter = self.find_to_zigbee(base)?;
        tracing::debug!(key, converter = converter.name(), endpoint, "Converting set");
        converter.convert_set(&self.context(device), endpoint, base, value)
    }

    /// Builds the requests that refresh `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unsupported or cannot be read.
    pub fn get_requests(&self, device: &DeviceInfo, key: &str) -> Result<Vec<ZclRequest>> {
        let (base, endpoint) = self.resolve_key(key);
        let endpoint = endpoint.unwrap_or_else(|| device.default_endpoint());
        let converter = self.find_to_zigbee(base)?;
        tracing::debug!(key, converter = converter.name(), endpoint, "Converting get");
        converter.convert_get(&self.context(device), endpoint, base)
    }

    /// Applies `value` to `key` on the device behind `entity`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or the transport
    /// fails.
    pub async fn set<E: Entity>(
        &self,
        entity: &E,
        device: &DeviceInfo,
        key: &str,
        value: &Value,
    ) -> Result<()> {
        let requests = self.set_requests(device, key, value)?;
        dispatch(entity, &requests).await?;
        Ok(())
    }

    /// Asks the device behind `entity` to report `key`.
    ///
    /// The answer arrives later as a read response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or the transport
    /// fails.
    pub async fn get<E: Entity>(&self, entity: &E, device: &DeviceInfo, key: &str) -> Result<()> {
        let requests = self.get_requests(device, key)?;
        dispatch(entity, &requests).await?;
        Ok(())
    }
}

/// Builder for [`DeviceDefinition`].
#[derive(Debug, Clone)]
pub struct DefinitionBuilder {
    definition: DeviceDefinition,
}

impl DefinitionBuilder {
    /// Creates a builder; the model id doubles as model and vendor name until
    /// overridden.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            definition: DeviceDefinition {
                zigbee_model: vec![model.clone()],
                vendor: model.clone(),
                model,
                description: String::new(),
                from_zigbee: Vec::new(),
                to_zigbee: Vec::new(),
                exposes: Vec::new(),
                meta: DeviceMeta::default(),
                endpoints: EndpointTable::new(),
                icon: None,
            },
        }
    }

    /// Sets the model name.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.definition.model = model.into();
        self
    }

    /// Sets the vendor name.
    #[must_use]
    pub fn vendor(mut self, vendor: impl Into<String>) -> Self {
        self.definition.vendor = vendor.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.definition.description = description.into();
        self
    }

    /// Appends an inbound converter.
    #[must_use]
    pub fn from_zigbee(mut self, converter: Arc<dyn FromZigbee>) -> Self {
        self.definition.from_zigbee.push(converter);
        self
    }

    /// Appends an outbound converter.
    #[must_use]
    pub fn to_zigbee(mut self, converter: Arc<dyn ToZigbee>) -> Self {
        self.definition.to_zigbee.push(converter);
        self
    }

    /// Appends an exposed capability.
    #[must_use]
    pub fn expose(mut self, expose: Expose) -> Self {
        self.definition.exposes.push(expose);
        self
    }

    /// Appends several exposed capabilities.
    #[must_use]
    pub fn exposes(mut self, exposes: impl IntoIterator<Item = Expose>) -> Self {
        self.definition.exposes.extend(exposes);
        self
    }

    /// Maps a channel name to an endpoint id.
    #[must_use]
    pub fn endpoint(mut self, channel: impl Into<String>, endpoint: u8) -> Self {
        self.definition.endpoints = self.definition.endpoints.with(channel, endpoint);
        self
    }

    /// Addresses options per channel.
    #[must_use]
    pub fn multi_endpoint(mut self) -> Self {
        self.definition.meta.multi_endpoint = true;
        self
    }

    /// Declares `channel` a binary input and exposes it as `<prefix>_<channel>`.
    #[must_use]
    pub fn binary_endpoint(mut self, channel: impl Into<String>, prefix: impl Into<String>) -> Self {
        let channel = channel.into();
        let prefix = prefix.into();
        let expose =
            Expose::binary(prefix.clone(), Access::STATE, true, false).with_endpoint(channel.clone());
        self.definition.exposes.push(expose);
        self.definition.meta.binary_endpoints.insert(channel, prefix);
        self
    }

    /// Sets the icon data URI.
    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.definition.icon = Some(icon.into());
        self
    }

    /// Finishes the definition.
    #[must_use]
    pub fn build(self) -> DeviceDefinition {
        self.definition
    }
}
