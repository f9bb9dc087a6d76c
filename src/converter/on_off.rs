// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Channel on/off state.

use serde::Deserialize;

use super::{ConvertContext, FromZigbee};
use crate::state::{PublishedState, field_name};
use crate::types::channel_name;
use crate::zcl::{AttributeReport, Cluster};

const DEFAULT_PREFIX: &str = "state";

#[derive(Debug, Deserialize)]
struct OnOffAttributes {
    #[serde(rename = "onOff", default)]
    on_off: Option<u8>,
}

/// Publishes `genOnOff` as `state_<ch>` (`"ON"`/`"OFF"`).
///
/// Channels listed in [`DeviceMeta::binary_endpoints`](crate::definition::DeviceMeta)
/// are raw binary inputs instead: they publish a boolean under the
/// configured prefix, e.g. `contact_l6: true`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OnOff;

impl FromZigbee for OnOff {
    fn name(&self) -> &'static str {
        "ptvo_on_off"
    }

    fn cluster(&self) -> Cluster {
        Cluster::GenOnOff
    }

    fn convert(
        &self,
        ctx: &ConvertContext<'_>,
        report: &AttributeReport,
    ) -> Option<PublishedState> {
        let Some(on_off) = report.decode::<OnOffAttributes>()?.on_off else {
            tracing::trace!(endpoint = report.endpoint(), "No onOff attribute in message");
            return None;
        };

        let channel = channel_name(report.endpoint());
        let is_on = on_off == 1;
        let mut state = PublishedState::new();
        match ctx.meta.binary_prefix(&channel) {
            Some(prefix) => state.insert(field_name(prefix, &channel), is_on),
            None => state.insert(
                field_name(DEFAULT_PREFIX, &channel),
                if is_on { "ON" } else { "OFF" },
            ),
        };
        Some(state)
    }
}
