// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-channel switch configuration.

use serde_json::Value;

use super::{ConvertContext, FromZigbee, ToZigbee, parse_float, parse_int};
use crate::error::Result;
use crate::state::{PublishedState, StateValue, field_name};
use crate::types::SwitchConfigOption;
use crate::zcl::{AttributeReport, Cluster, ZclRequest};

const KEYS: &[&str] = &["switch_type", "switch_actions", "link_to_output", "bind_command"];

/// Reads the code of one option. Integral floats and numeric strings are
/// accepted; anything else is not a code.
fn reported_code(value: &Value) -> Option<i64> {
    parse_float(value)
        .filter(|f| f.fract() == 0.0)
        .and_then(|_| parse_int(value))
}

/// Reads and writes the four `genOnOffSwitchCfg` options of a channel.
///
/// Inbound, each reported option becomes `<option>_<channel>` with the
/// option name as value; options missing from the message are left out.
/// Outbound, any of the keys refreshes all four options in one read, and a
/// set writes exactly one attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwitchConfig;

impl FromZigbee for SwitchConfig {
    fn name(&self) -> &'static str {
        "ptvo_on_off_config"
    }

    fn cluster(&self) -> Cluster {
        Cluster::GenOnOffSwitchCfg
    }

    fn convert(
        &self,
        ctx: &ConvertContext<'_>,
        report: &AttributeReport,
    ) -> Option<PublishedState> {
        let channel = ctx.channel(report.endpoint());

        let mut state = PublishedState::new();
        for option in SwitchConfigOption::ALL {
            let Some(raw) = report.get(&option.attribute()) else {
                continue;
            };
            let name = reported_code(raw)
                .and_then(|code| u8::try_from(code).ok())
                .and_then(|code| option.decode(code));
            if name.is_none() {
                tracing::debug!(
                    option = option.key(),
                    code = %raw,
                    channel = %channel,
                    "Device reported an unknown option code"
                );
            }
            state.insert(field_name(option.key(), &channel), StateValue::from(name));
        }
        Some(state)
    }
}

impl ToZigbee for SwitchConfig {
    fn name(&self) -> &'static str {
        "ptvo_on_off_config"
    }

    fn keys(&self) -> &'static [&'static str] {
        KEYS
    }

    fn convert_set(
        &self,
        _ctx: &ConvertContext<'_>,
        endpoint: u8,
        key: &str,
        value: &Value,
    ) -> Result<Vec<ZclRequest>> {
        let option: SwitchConfigOption = key.parse()?;
        let payload = option.encode(value)?;
        Ok(vec![ZclRequest::Write {
            endpoint,
            cluster: Cluster::GenOnOffSwitchCfg,
            payload,
        }])
    }

    fn convert_get(
        &self,
        _ctx: &ConvertContext<'_>,
        endpoint: u8,
        key: &str,
    ) -> Result<Vec<ZclRequest>> {
        key.parse::<SwitchConfigOption>()?;
        Ok(vec![ZclRequest::Read {
            endpoint,
            cluster: Cluster::GenOnOffSwitchCfg,
            attributes: SwitchConfigOption::all_attributes(),
        }])
    }
}
