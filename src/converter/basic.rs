// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{ConvertContext, FromZigbee};
use crate::state::PublishedState;
use crate::zcl::{AttributeReport, Cluster};

/// Swallows `genBasic` reports, which carry nothing worth publishing.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreBasicReport;

impl FromZigbee for IgnoreBasicReport {
    fn name(&self) -> &'static str {
        "ignore_basic_report"
    }

    fn cluster(&self) -> Cluster {
        Cluster::GenBasic
    }

    fn convert(&self, _ctx: &ConvertContext<'_>, _report: &AttributeReport) -> Option<PublishedState> {
        None
    }
}
