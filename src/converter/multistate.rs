// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Button actions reported through `genMultistateInput`.

use serde::Deserialize;

use super::{ConvertContext, FromZigbee};
use crate::state::PublishedState;
use crate::zcl::{AttributeReport, Cluster};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MultistateAttributes {
    #[serde(default)]
    present_value: Option<i64>,
}

fn present_value(report: &AttributeReport) -> Option<i64> {
    report.decode::<MultistateAttributes>()?.present_value
}

/// Publishes `action` (`single`, `double`, `triple`, `hold`, `release`).
///
/// On multi-endpoint devices the action is suffixed with the channel, e.g.
/// `single_l1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultistateAction;

impl MultistateAction {
    /// Actions this converter can publish, for the `action` expose.
    pub const ACTIONS: [&'static str; 5] = ["single", "double", "triple", "hold", "release"];

    fn action(value: i64) -> Option<&'static str> {
        match value {
            0 => Some("release"),
            1 => Some("single"),
            2 => Some("double"),
            3 => Some("triple"),
            4 => Some("hold"),
            _ => None,
        }
    }
}

impl FromZigbee for MultistateAction {
    fn name(&self) -> &'static str {
        "ptvo_multistate_action"
    }

    fn cluster(&self) -> Cluster {
        Cluster::GenMultistateInput
    }

    fn convert(
        &self,
        ctx: &ConvertContext<'_>,
        report: &AttributeReport,
    ) -> Option<PublishedState> {
        let value = present_value(report)?;
        let Some(action) = Self::action(value) else {
            tracing::debug!(endpoint = report.endpoint(), value, "Unknown multistate action");
            return None;
        };

        let action = if ctx.meta.multi_endpoint {
            format!("{action}_{}", ctx.channel(report.endpoint()))
        } else {
            action.to_string()
        };
        Some([("action", action)].into_iter().collect())
    }
}

/// Publishes `click` as `<channel>[_<action>]`, the format older hub
/// versions expected from this firmware.
///
/// Only channels listed in the model's endpoint table produce a click.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyButtons;

impl LegacyButtons {
    fn action(value: i64) -> Option<&'static str> {
        match value {
            1 => Some("single"),
            2 => Some("double"),
            3 => Some("triple"),
            4 => Some("hold"),
            _ => None,
        }
    }
}

impl FromZigbee for LegacyButtons {
    fn name(&self) -> &'static str {
        "ptvo_switch_buttons"
    }

    fn cluster(&self) -> Cluster {
        Cluster::GenMultistateInput
    }

    fn convert(
        &self,
        ctx: &ConvertContext<'_>,
        report: &AttributeReport,
    ) -> Option<PublishedState> {
        let value = present_value(report)?;
        let button = ctx.endpoints.name_of(report.endpoint())?;
        let click = match Self::action(value) {
            Some(action) => format!("{button}_{action}"),
            None => button.to_string(),
        };
        Some([("click", click)].into_iter().collect())
    }
}
