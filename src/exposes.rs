// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Capability declarations ("exposes") presented to the hub.
//!
//! An [`Expose`] describes one state field: its type, how it may be
//! accessed, and optionally the endpoint it belongs to. Binding an expose to
//! an endpoint changes its published property from `name` to
//! `name_<endpoint>`, matching the fields produced by the converters.
//!
//! # Examples
//!
//! ```
//! use ptvo_rc4::exposes::{presets, Access, Expose};
//!
//! let uptime = Expose::numeric("l7", Access::STATE).with_description("Uptime (seconds)");
//! assert_eq!(uptime.property(), "l7");
//!
//! let voltage = presets::voltage().with_endpoint("l6");
//! assert_eq!(voltage.property(), "voltage_l6");
//! ```

use std::ops::BitOr;

use serde::Serialize;

/// Access flags of an exposed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Access(u8);

impl Access {
    /// Value is published in the device state.
    pub const STATE: Self = Self(0b001);
    /// Value can be set.
    pub const SET: Self = Self(0b010);
    /// Value can be read on request.
    pub const GET: Self = Self(0b100);
    /// Published and settable.
    pub const STATE_SET: Self = Self(0b011);
    /// Published and readable on request.
    pub const STATE_GET: Self = Self(0b101);
    /// Published, settable and readable.
    pub const ALL: Self = Self(0b111);

    /// Returns the raw bit set.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` if every flag of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Access {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Data type of an exposed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExposeKind {
    /// Number, optionally with unit and bounds.
    Numeric,
    /// One of a fixed list of strings.
    Enum,
    /// Two-state value.
    Binary,
}

/// One exposed state field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expose {
    #[serde(rename = "type")]
    kind: ExposeKind,
    name: String,
    property: String,
    access: Access,
    #[serde(skip_serializing_if = "Option::is_none")]
    endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value_max: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value_on: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value_off: Option<serde_json::Value>,
}

impl Expose {
    fn new(kind: ExposeKind, name: impl Into<String>, access: Access) -> Self {
        let name = name.into();
        Self {
            kind,
            property: name.clone(),
            name,
            access,
            endpoint: None,
            description: None,
            unit: None,
            value_min: None,
            value_max: None,
            values: Vec::new(),
            value_on: None,
            value_off: None,
        }
    }

    /// Declares a numeric field.
    #[must_use]
    pub fn numeric(name: impl Into<String>, access: Access) -> Self {
        Self::new(ExposeKind::Numeric, name, access)
    }

    /// Declares an enumerated field.
    #[must_use]
    pub fn enumeration<I, S>(name: impl Into<String>, access: Access, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut expose = Self::new(ExposeKind::Enum, name, access);
        expose.values = values.into_iter().map(Into::into).collect();
        expose
    }

    /// Declares a two-state field.
    #[must_use]
    pub fn binary(
        name: impl Into<String>,
        access: Access,
        value_on: impl Into<serde_json::Value>,
        value_off: impl Into<serde_json::Value>,
    ) -> Self {
        let mut expose = Self::new(ExposeKind::Binary, name, access);
        expose.value_on = Some(value_on.into());
        expose.value_off = Some(value_off.into());
        expose
    }

    /// Binds the field to an endpoint; the property becomes `name_<endpoint>`.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        self.property = format!("{}_{endpoint}", self.name);
        self.endpoint = Some(endpoint);
        self
    }

    /// Replaces the access flags.
    #[must_use]
    pub fn with_access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the unit.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Sets the lower bound.
    #[must_use]
    pub fn with_value_min(mut self, min: f64) -> Self {
        self.value_min = Some(min);
        self
    }

    /// Sets the upper bound.
    #[must_use]
    pub fn with_value_max(mut self, max: f64) -> Self {
        self.value_max = Some(max);
        self
    }

    /// Returns the field type.
    #[must_use]
    pub const fn kind(&self) -> ExposeKind {
        self.kind
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the published property name.
    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Returns the access flags.
    #[must_use]
    pub const fn access(&self) -> Access {
        self.access
    }

    /// Returns the bound endpoint.
    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the unit.
    #[must_use]
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    /// Returns the allowed values of an enumerated field.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Commonly used declarations.
pub mod presets {
    use super::{Access, Expose};

    /// Remaining battery in percent.
    #[must_use]
    pub fn battery() -> Expose {
        Expose::numeric("battery", Access::STATE)
            .with_unit("%")
            .with_description("Remaining battery in %")
            .with_value_min(0.0)
            .with_value_max(100.0)
    }

    /// Battery voltage in millivolts.
    #[must_use]
    pub fn battery_voltage() -> Expose {
        Expose::numeric("voltage", Access::STATE)
            .with_unit("mV")
            .with_description("Voltage of the battery in millivolts")
    }

    /// Measured voltage in volts.
    #[must_use]
    pub fn voltage() -> Expose {
        Expose::numeric("voltage", Access::STATE)
            .with_unit("V")
            .with_description("Measured electrical potential value")
    }

    /// Triggered action.
    #[must_use]
    pub fn action<I, S>(values: I) -> Expose
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Expose::enumeration("action", Access::STATE, values)
            .with_description("Triggered action (e.g. a button click)")
    }
}
