// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `ptvo.rc4` build of the configurable firmware.
//!
//! Channels `l1`..`l4` are buttons with per-input switch configuration,
//! `l6` measures the supply voltage, `l7` counts uptime and `l8` carries the
//! signal strength level.

use std::sync::Arc;

use super::{DefinitionBuilder, DeviceDefinition};
use crate::converter::{
    AnalogInput, Battery, FromZigbee, IgnoreBasicReport, MultistateAction, OnOff, SwitchConfig,
    SwitchTrigger,
};
use crate::exposes::{Access, Expose, presets};
use crate::types::SwitchConfigOption;

const MODEL: &str = "ptvo.rc4";
const DESCRIPTION: &str =
    "[Configurable firmware](https://ptvo.info/zigbee-configurable-firmware-features/)";
const ICON: &str = include_str!("../../assets/ptvo_rc4.png.b64");

impl DeviceDefinition {
    /// Definition of the `ptvo.rc4` remote.
    ///
    /// `legacy` is the click converter older hub versions expect on
    /// `genMultistateInput`, normally [`LegacyButtons`](crate::converter::LegacyButtons);
    /// it runs after the action converter.
    #[must_use]
    pub fn ptvo_rc4(legacy: Arc<dyn FromZigbee>) -> Self {
        let switch_config = Arc::new(SwitchConfig);
        let analog_input = Arc::new(AnalogInput);

        DefinitionBuilder::new(MODEL)
            .description(DESCRIPTION)
            .from_zigbee(Arc::new(IgnoreBasicReport))
            .from_zigbee(Arc::new(Battery))
            .from_zigbee(analog_input.clone())
            .from_zigbee(Arc::new(MultistateAction))
            .from_zigbee(legacy)
            .from_zigbee(Arc::new(OnOff))
            .from_zigbee(switch_config.clone())
            .to_zigbee(Arc::new(SwitchTrigger))
            .to_zigbee(analog_input)
            .to_zigbee(switch_config)
            .expose(presets::battery())
            .expose(presets::voltage().with_access(Access::STATE).with_endpoint("l6"))
            .expose(Expose::numeric("l7", Access::STATE).with_description("Uptime (seconds)"))
            .expose(
                Expose::numeric("l8", Access::ALL)
                    .with_description("Signal strength level (0..20)"),
            )
            .expose(presets::action(MultistateAction::ACTIONS))
            .expose(presets::battery_voltage())
            .endpoint("l6", 6)
            .endpoint("l7", 7)
            .endpoint("l8", 8)
            .endpoint("l1", 1)
            .endpoint("l2", 2)
            .endpoint("l3", 3)
            .endpoint("l4", 4)
            .multi_endpoint()
            .icon(ICON)
            .build()
    }
}

/// The four switch configuration options of an input channel, writable and
/// readable, listed in code order.
///
/// # Examples
///
/// ```
/// use ptvo_rc4::definition::switch_config_exposes;
///
/// let exposes = switch_config_exposes("l1");
///
/// assert_eq!(exposes[0].property(), "switch_type_l1");
/// assert_eq!(
///     exposes[0].values(),
///     ["switch", "single click", "multi-click", "reset to defaults"]
/// );
/// ```
#[must_use]
pub fn switch_config_exposes(endpoint: &str) -> Vec<Expose> {
    SwitchConfigOption::ALL
        .iter()
        .map(|option| {
            Expose::enumeration(option.key(), Access::ALL, option.table().sorted_names())
                .with_endpoint(endpoint)
        })
        .collect()
}
