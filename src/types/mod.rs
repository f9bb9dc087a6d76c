// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for the `ptvo.rc4` firmware configuration.
//!
//! # Types
//!
//! - [`OptionTable`] - Closed name/code table for an enumerated option
//! - [`SwitchConfigOption`] - The four per-channel switch settings
//! - [`EndpointTable`] - Channel name to endpoint id mapping

mod endpoint;
mod option_table;
mod switch_config;

pub use endpoint::{EndpointTable, channel_name};
pub use option_table::OptionTable;
pub use switch_config::{
    BIND_COMMANDS, INPUT_LINK, SWITCH_ACTIONS, SWITCH_TYPES, SwitchConfigOption,
};
