// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Battery level and voltage.

use serde::Deserialize;

use super::{ConvertContext, FromZigbee};
use crate::state::PublishedState;
use crate::zcl::{AttributeReport, Cluster};

/// ZCL "invalid" marker for both battery attributes.
const INVALID: f64 = 255.0;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PowerCfgAttributes {
    #[serde(default)]
    battery_percentage_remaining: Option<f64>,
    #[serde(default)]
    battery_voltage: Option<f64>,
}

/// Publishes `battery` (%) and `voltage` (mV) from `genPowerCfg`.
///
/// The device reports the level in half-percent steps (0-200) and the
/// voltage in 100 mV units. The invalid marker `0xFF` is skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct Battery;

impl FromZigbee for Battery {
    fn name(&self) -> &'static str {
        "battery"
    }

    fn cluster(&self) -> Cluster {
        Cluster::GenPowerCfg
    }

    fn convert(
        &self,
        _ctx: &ConvertContext<'_>,
        report: &AttributeReport,
    ) -> Option<PublishedState> {
        let attributes = report.decode::<PowerCfgAttributes>()?;

        let mut state = PublishedState::new();
        let valid = |raw: &f64| *raw < INVALID;
        if let Some(raw) = attributes.battery_percentage_remaining.filter(valid) {
            state.insert("battery", (raw / 2.0).round().clamp(0.0, 100.0));
        }
        if let Some(raw) = attributes.battery_voltage.filter(valid) {
            state.insert("voltage", raw * 100.0);
        }
        (!state.is_empty()).then_some(state)
    }
}
