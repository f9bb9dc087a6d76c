// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switch configuration options of the PTVO firmware.
//!
//! Each input channel carries four settings in the `genOnOffSwitchCfg`
//! cluster. Two are standard ZCL attributes; the other two are vendor
//! attributes (`0x4001`, `0x4002`) which have no schema entry and must be
//! written with an explicit `uint8` type tag.
//!
//! | Option | Attribute | Values |
//! |--------|-----------|--------|
//! | `switch_type` | `switchType` | switch, single click, multi-click, reset to defaults |
//! | `switch_actions` | `switchActions` | on, off, toggle |
//! | `link_to_output` | `0x4001` | no, yes |
//! | `bind_command` | `0x4002` | on/off, toggle, level up/down, recall scene 0-5 |

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::{ConvertError, ValueError};
use crate::types::OptionTable;
use crate::zcl::{AttributeId, DataType, WritePayload, WriteValue, attr};

/// Input type of a channel. `0xFF` restores firmware defaults.
pub static SWITCH_TYPES: OptionTable = OptionTable::new(
    "switch_type",
    &[
        ("switch", 0x00),
        ("single click", 0x01),
        ("multi-click", 0x02),
        ("reset to defaults", 0xFF),
    ],
);

/// Output action triggered by the input.
pub static SWITCH_ACTIONS: OptionTable = OptionTable::new(
    "switch_actions",
    &[("on", 0x00), ("off", 0x01), ("toggle", 0x02)],
);

/// Whether the input drives the local output.
pub static INPUT_LINK: OptionTable =
    OptionTable::new("link_to_output", &[("no", 0x00), ("yes", 0x01)]);

/// Command sent to bound devices when the input fires.
pub static BIND_COMMANDS: OptionTable = OptionTable::new(
    "bind_command",
    &[
        ("on/off", 0x00),
        ("toggle", 0x01),
        ("change level up", 0x02),
        ("change level down", 0x03),
        ("change level up with off", 0x04),
        ("change level down with off", 0x05),
        ("recall scene 0", 0x06),
        ("recall scene 1", 0x07),
        ("recall scene 2", 0x08),
        ("recall scene 3", 0x09),
        ("recall scene 4", 0x0A),
        ("recall scene 5", 0x0B),
    ],
);

/// One of the four per-channel switch settings.
///
/// # Examples
///
/// ```
/// use ptvo_rc4::types::SwitchConfigOption;
///
/// let option: SwitchConfigOption = "link_to_output".parse().unwrap();
/// assert_eq!(option, SwitchConfigOption::LinkToOutput);
/// assert!(option.is_manufacturer_specific());
/// assert!("colour".parse::<SwitchConfigOption>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchConfigOption {
    /// Input type (`switchType`).
    SwitchType,
    /// Output action (`switchActions`).
    SwitchActions,
    /// Input-to-output link (vendor attribute `0x4001`).
    LinkToOutput,
    /// Command sent to bound devices (vendor attribute `0x4002`).
    BindCommand,
}

impl SwitchConfigOption {
    /// All options, in the order the device reports them.
    pub const ALL: [Self; 4] = [
        Self::SwitchType,
        Self::SwitchActions,
        Self::LinkToOutput,
        Self::BindCommand,
    ];

    /// Returns the option key used in hub requests and state fields.
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.table().key()
    }

    /// Returns the name/code table for this option.
    #[must_use]
    pub fn table(&self) -> &'static OptionTable {
        match self {
            Self::SwitchType => &SWITCH_TYPES,
            Self::SwitchActions => &SWITCH_ACTIONS,
            Self::LinkToOutput => &INPUT_LINK,
            Self::BindCommand => &BIND_COMMANDS,
        }
    }

    /// Returns the attribute that stores this option.
    #[must_use]
    pub const fn attribute(&self) -> AttributeId {
        match self {
            Self::SwitchType => attr::SWITCH_TYPE,
            Self::SwitchActions => attr::SWITCH_ACTIONS,
            Self::LinkToOutput => attr::LINK_TO_OUTPUT,
            Self::BindCommand => attr::BIND_COMMAND,
        }
    }

    /// Returns `true` for vendor attributes that need an explicit type tag.
    #[must_use]
    pub const fn is_manufacturer_specific(&self) -> bool {
        matches!(self, Self::LinkToOutput | Self::BindCommand)
    }

    /// Returns the attributes of all four options, for a coalesced read.
    #[must_use]
    pub fn all_attributes() -> Vec<AttributeId> {
        Self::ALL.iter().map(Self::attribute).collect()
    }

    /// Builds the single-attribute write for an already resolved code.
    #[must_use]
    pub fn write_payload(&self, code: u8) -> WritePayload {
        let value = if self.is_manufacturer_specific() {
            WriteValue::typed(code, DataType::Uint8)
        } else {
            WriteValue::plain(code)
        };
        WritePayload::single(self.attribute(), value)
    }

    /// Resolves a hub value and builds the write for it.
    ///
    /// # Errors
    ///
    /// Returns `ValueError` if the value is neither an option name nor a
    /// byte-sized integer.
    pub fn encode(&self, value: &Value) -> Result<WritePayload, ValueError> {
        let code = self.table().code_for_name(value)?;
        Ok(self.write_payload(code))
    }

    /// Decodes a reported code to its option name.
    #[must_use]
    pub fn decode(&self, code: u8) -> Option<&'static str> {
        self.table().name_for_code(code)
    }
}

impl fmt::Display for SwitchConfigOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SwitchConfigOption {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|option| option.key() == s)
            .ok_or_else(|| ConvertError::UnsupportedKey(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde_json::json;

    use super::*;

    #[test]
    fn every_name_round_trips_through_its_code() {
        for option in SwitchConfigOption::ALL {
            for &(name, _) in option.table().entries() {
                let code = option.table().code_for_str(name).unwrap();
                assert_eq!(option.decode(code), Some(name), "{option}: {name}");
            }
        }
    }

    #[test]
    fn codes_are_unique_within_each_table() {
        for option in SwitchConfigOption::ALL {
            let entries = option.table().entries();
            let codes: HashSet<u8> = entries.iter().map(|&(_, c)| c).collect();
            assert_eq!(codes.len(), entries.len(), "{option}");
        }
    }

    #[test]
    fn sorted_names_are_strictly_ascending_by_code() {
        for option in SwitchConfigOption::ALL {
            let table = option.table();
            let codes: Vec<u8> = table
                .sorted_names()
                .into_iter()
                .map(|name| table.code_for_str(name).unwrap())
                .collect();
            assert!(codes.windows(2).all(|w| w[0] < w[1]), "{option}");
        }
    }

    #[test]
    fn reset_to_defaults_is_reserved() {
        assert_eq!(SWITCH_TYPES.name_for_code(0xFF), Some("reset to defaults"));
        assert_eq!(
            SWITCH_TYPES.sorted_names().last(),
            Some(&"reset to defaults")
        );
    }

    #[test]
    fn switch_type_multi_click_is_written_untyped() {
        let payload = SwitchConfigOption::SwitchType
            .encode(&json!("multi-click"))
            .unwrap();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"switchType": 2})
        );
    }

    #[test]
    fn link_to_output_is_tagged_uint8() {
        let payload = SwitchConfigOption::LinkToOutput
            .encode(&json!("yes"))
            .unwrap();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"16385": {"value": 1, "type": 32}})
        );
    }

    #[test]
    fn bind_command_accepts_raw_code() {
        let payload = SwitchConfigOption::BindCommand.encode(&json!("200")).unwrap();
        assert_eq!(
            payload.get(&attr::BIND_COMMAND),
            Some(&WriteValue::typed(200, DataType::Uint8))
        );
    }

    #[test]
    fn parse_keys() {
        for option in SwitchConfigOption::ALL {
            assert_eq!(option.key().parse::<SwitchConfigOption>(), Ok(option));
        }
        assert_eq!(
            "switch".parse::<SwitchConfigOption>(),
            Err(ConvertError::UnsupportedKey("switch".to_string()))
        );
    }

    #[test]
    fn coalesced_read_lists_all_attributes() {
        assert_eq!(
            SwitchConfigOption::all_attributes(),
            vec![
                attr::SWITCH_TYPE,
                attr::SWITCH_ACTIONS,
                attr::LINK_TO_OUTPUT,
                attr::BIND_COMMAND,
            ]
        );
    }
}
