// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zigbee Cluster Library vocabulary used by the profile.
//!
//! Only the clusters and attributes this firmware talks about are modelled.
//! Attributes are addressed either by their schema name or, for vendor
//! attributes outside the schema, by their numeric code.

mod device_info;
mod payload;
mod report;
mod request;

pub use device_info::{DeviceInfo, EndpointInfo};
pub use payload::{ReportingConfig, WritePayload, WriteValue};
pub use report::{AttributeReport, MessageKind};
pub use request::ZclRequest;

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Clusters the profile reads, writes or listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Cluster {
    /// Basic device information (`0x0000`).
    GenBasic,
    /// Power configuration, battery level and voltage (`0x0001`).
    GenPowerCfg,
    /// On/off switching (`0x0006`).
    GenOnOff,
    /// On/off switch configuration (`0x0007`).
    GenOnOffSwitchCfg,
    /// Level control (`0x0008`).
    GenLevelCtrl,
    /// Analog input (`0x000C`).
    GenAnalogInput,
    /// Multistate input (`0x0012`).
    GenMultistateInput,
}

impl Cluster {
    /// Returns the numeric cluster id.
    #[must_use]
    pub const fn id(&self) -> u16 {
        match self {
            Self::GenBasic => 0x0000,
            Self::GenPowerCfg => 0x0001,
            Self::GenOnOff => 0x0006,
            Self::GenOnOffSwitchCfg => 0x0007,
            Self::GenLevelCtrl => 0x0008,
            Self::GenAnalogInput => 0x000C,
            Self::GenMultistateInput => 0x0012,
        }
    }

    /// Returns the cluster name as the hub spells it.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GenBasic => "genBasic",
            Self::GenPowerCfg => "genPowerCfg",
            Self::GenOnOff => "genOnOff",
            Self::GenOnOffSwitchCfg => "genOnOffSwitchCfg",
            Self::GenLevelCtrl => "genLevelCtrl",
            Self::GenAnalogInput => "genAnalogInput",
            Self::GenMultistateInput => "genMultistateInput",
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifies an attribute within a cluster.
///
/// Vendor attributes have no name in the cluster schema. In report and
/// payload objects they are keyed by their decimal code, so `0x4001` appears
/// as `"16385"`.
///
/// # Examples
///
/// ```
/// use ptvo_rc4::zcl::AttributeId;
///
/// assert_eq!(AttributeId::Name("onOff").key(), "onOff");
/// assert_eq!(AttributeId::Code(0x4001).key(), "16385");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttributeId {
    /// A schema attribute, addressed by name.
    Name(&'static str),
    /// A manufacturer-specific attribute, addressed by code.
    Code(u16),
}

impl AttributeId {
    /// Returns the key under which the attribute appears in JSON objects.
    #[must_use]
    pub fn key(&self) -> Cow<'static, str> {
        match self {
            Self::Name(name) => Cow::Borrowed(*name),
            Self::Code(code) => Cow::Owned(code.to_string()),
        }
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Code(code) => write!(f, "0x{code:04x}"),
        }
    }
}

impl Serialize for AttributeId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key())
    }
}

/// Attributes referenced by the profile's converters.
pub mod attr {
    use super::AttributeId;

    /// `genOnOff` state.
    pub const ON_OFF: AttributeId = AttributeId::Name("onOff");
    /// `genOnOffSwitchCfg` input type.
    pub const SWITCH_TYPE: AttributeId = AttributeId::Name("switchType");
    /// `genOnOffSwitchCfg` output action.
    pub const SWITCH_ACTIONS: AttributeId = AttributeId::Name("switchActions");
    /// PTVO vendor attribute linking an input to its output.
    pub const LINK_TO_OUTPUT: AttributeId = AttributeId::Code(0x4001);
    /// PTVO vendor attribute selecting the command sent to bound devices.
    pub const BIND_COMMAND: AttributeId = AttributeId::Code(0x4002);
    /// `genAnalogInput` / `genMultistateInput` value.
    pub const PRESENT_VALUE: AttributeId = AttributeId::Name("presentValue");
    /// `genAnalogInput` description, `"<unit>,<device id>"` on this firmware.
    pub const DESCRIPTION: AttributeId = AttributeId::Name("description");
    /// `genLevelCtrl` level.
    pub const CURRENT_LEVEL: AttributeId = AttributeId::Name("currentLevel");
    /// `genPowerCfg` battery level in half percent.
    pub const BATTERY_PERCENTAGE_REMAINING: AttributeId =
        AttributeId::Name("batteryPercentageRemaining");
    /// `genPowerCfg` battery voltage in 100 mV units.
    pub const BATTERY_VOLTAGE: AttributeId = AttributeId::Name("batteryVoltage");
}

/// ZCL data type tags used when writing attributes without a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DataType {
    /// Unsigned 8-bit integer (`0x20`).
    Uint8 = 0x20,
}

impl DataType {
    /// Returns the numeric type tag.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl Serialize for DataType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cluster_names_match_serde() {
        for cluster in [
            Cluster::GenBasic,
            Cluster::GenPowerCfg,
            Cluster::GenOnOff,
            Cluster::GenOnOffSwitchCfg,
            Cluster::GenLevelCtrl,
            Cluster::GenAnalogInput,
            Cluster::GenMultistateInput,
        ] {
            let json = serde_json::to_value(cluster).unwrap();
            assert_eq!(json, serde_json::Value::String(cluster.name().to_string()));
        }
    }

    #[test]
    fn cluster_ids() {
        assert_eq!(Cluster::GenOnOff.id(), 6);
        assert_eq!(Cluster::GenOnOffSwitchCfg.id(), 7);
        assert_eq!(Cluster::GenMultistateInput.id(), 0x12);
    }

    #[test]
    fn attribute_display() {
        assert_eq!(attr::SWITCH_TYPE.to_string(), "switchType");
        assert_eq!(attr::BIND_COMMAND.to_string(), "0x4002");
        assert_eq!(attr::BIND_COMMAND.key(), "16386");
    }

    #[test]
    fn uint8_tag_is_32() {
        assert_eq!(DataType::Uint8.code(), 32);
        assert_eq!(serde_json::to_string(&DataType::Uint8).unwrap(), "32");
    }
}
