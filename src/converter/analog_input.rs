// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Analog channels (`l1`..`l16`).
//!
//! The firmware exposes sensors, counters and dimmers as `genAnalogInput`
//! endpoints. A sensor endpoint describes itself through the `description`
//! attribute as `"<unit>,<device id>"`, e.g. `"C,28-0000055aa1b2"` for a
//! 1-wire thermometer; the unit selects the name of an extra published field.
//! Endpoints that also carry `genLevelCtrl` are dimmers.

use serde::Deserialize;
use serde_json::Value;

use super::{ConvertContext, FromZigbee, ToZigbee, parse_float, parse_int, precision_round};
use crate::error::{ConvertError, Result};
use crate::state::{PublishedState, field_name};
use crate::types::channel_name;
use crate::zcl::{AttributeReport, Cluster, WritePayload, WriteValue, ZclRequest, attr};

const KEYS: &[&str] = &[
    "l1", "l2", "l3", "l4", "l5", "l6", "l7", "l8", "l9", "l10", "l11", "l12", "l13", "l14",
    "l15", "l16",
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalogInputAttributes {
    #[serde(default)]
    present_value: Option<f64>,
    #[serde(default)]
    description: Option<String>,
}

/// Field name for a sensor unit.
fn unit_field(unit: &str) -> Option<String> {
    let name = match unit {
        "C" => "temperature",
        "%" => "humidity",
        "m" => "altitude",
        "Pa" => "pressure",
        "ppm" => "quality",
        "psize" => "particle_size",
        "V" => "voltage",
        "A" => "current",
        "Wh" => "energy",
        "W" => "power",
        "Hz" => "frequency",
        "pf" => "power_factor",
        "lx" => "illuminance_lux",
        _ => {
            // Particle counters: "mcpm1", "ncpm2", ... with "A" standing for 10.
            if let Some(bucket) = unit.strip_prefix("mcpm").or_else(|| unit.strip_prefix("ncpm")) {
                return Some(if bucket.starts_with('A') {
                    format!("{}10", &unit[..4])
                } else {
                    unit.to_string()
                });
            }
            return unit.parse::<i64>().is_ok().then(|| format!("val{unit}"));
        }
    };
    Some(name.to_string())
}

fn unit_precision(unit: &str, raw: f64) -> i32 {
    if unit.starts_with("mcpm") || unit.starts_with("ncpm") {
        2
    } else if unit == "A" && raw < 1.0 {
        3
    } else {
        1
    }
}

/// Endpoint id encoded in an `l<n>` key.
fn key_endpoint(key: &str) -> Option<u8> {
    key.strip_prefix('l')?.parse().ok()
}

/// Converts `genAnalogInput` in both directions.
///
/// Inbound, publishes `l<ch>` plus either `brightness_l<ch>` (dimmers) or the
/// sensor fields derived from `description`. Outbound, writes the level of
/// a dimmer or the present value of any other analog endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalogInput;

impl FromZigbee for AnalogInput {
    fn name(&self) -> &'static str {
        "ptvo_switch_analog_input"
    }

    fn cluster(&self) -> Cluster {
        Cluster::GenAnalogInput
    }

    fn convert(
        &self,
        ctx: &ConvertContext<'_>,
        report: &AttributeReport,
    ) -> Option<PublishedState> {
        let attributes = report.decode::<AnalogInputAttributes>()?;
        let raw = attributes.present_value?;
        let endpoint = report.endpoint();
        let channel = channel_name(endpoint);

        let mut state = PublishedState::new();
        state.insert(channel.clone(), precision_round(raw, 3));

        if ctx.device.supports(endpoint, Cluster::GenLevelCtrl) {
            state.insert(field_name("brightness", &channel), raw);
            return Some(state);
        }

        let Some(description) = attributes.description.filter(|d| !d.is_empty()) else {
            return Some(state);
        };
        let mut parts = description.split(',');
        let unit = parts.next().unwrap_or_default();
        if let Some(device_id) = parts.next().filter(|id| !id.is_empty()) {
            state.insert(field_name("device", &channel), device_id);
        }
        if !unit.is_empty() {
            match unit_field(unit) {
                Some(name) => {
                    let value = precision_round(raw, unit_precision(unit, raw));
                    state.insert(field_name(&name, &channel), value);
                }
                None => tracing::debug!(endpoint, unit, "Unknown analog unit"),
            }
        }
        Some(state)
    }
}

impl ToZigbee for AnalogInput {
    fn name(&self) -> &'static str {
        "ptvo_switch_analog_input"
    }

    fn keys(&self) -> &'static [&'static str] {
        KEYS
    }

    fn convert_set(
        &self,
        ctx: &ConvertContext<'_>,
        _endpoint: u8,
        key: &str,
        value: &Value,
    ) -> Result<Vec<ZclRequest>> {
        let endpoint = self.target(ctx, key)?;
        let Some(endpoint) = endpoint else {
            return Ok(Vec::new());
        };

        if ctx.device.supports(endpoint, Cluster::GenLevelCtrl) {
            let Some(level) = parse_int(value) else {
                tracing::debug!(key, %value, "Ignoring non-numeric level");
                return Ok(Vec::new());
            };
            return Ok(vec![ZclRequest::Write {
                endpoint,
                cluster: Cluster::GenLevelCtrl,
                payload: WritePayload::single(attr::CURRENT_LEVEL, WriteValue::plain(level)),
            }]);
        }

        if ctx.device.supports(endpoint, Cluster::GenAnalogInput) {
            let Some(present) = parse_float(value) else {
                tracing::debug!(key, %value, "Ignoring non-numeric analog value");
                return Ok(Vec::new());
            };
            return Ok(vec![ZclRequest::Write {
                endpoint,
                cluster: Cluster::GenAnalogInput,
                payload: WritePayload::single(attr::PRESENT_VALUE, WriteValue::plain(present)),
            }]);
        }

        Ok(Vec::new())
    }

    fn convert_get(
        &self,
        ctx: &ConvertContext<'_>,
        _endpoint: u8,
        key: &str,
    ) -> Result<Vec<ZclRequest>> {
        Ok(self
            .target(ctx, key)?
            .map(|endpoint| ZclRequest::Read {
                endpoint,
                cluster: Cluster::GenAnalogInput,
                attributes: vec![attr::PRESENT_VALUE, attr::DESCRIPTION],
            })
            .into_iter()
            .collect())
    }
}

impl AnalogInput {
    /// Endpoint addressed by `key`, or `None` if the device lacks it.
    fn target(&self, ctx: &ConvertContext<'_>, key: &str) -> Result<Option<u8>> {
        let endpoint = key_endpoint(key)
            .filter(|_| ToZigbee::handles(self, key))
            .ok_or_else(|| ConvertError::UnsupportedKey(key.to_string()))?;
        if ctx.device.has_endpoint(endpoint) {
            Ok(Some(endpoint))
        } else {
            tracing::debug!(key, endpoint, "Device has no such analog endpoint");
            Ok(None)
        }
    }
}
