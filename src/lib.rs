// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `ptvo_rc4` - Zigbee device profile for the PTVO configurable firmware.
//!
//! This library describes the `ptvo.rc4` build of the PTVO firmware to a
//! Zigbee hub: how its attribute reports become published state, how option
//! changes become attribute writes, and which capabilities it exposes.
//!
//! # Supported Features
//!
//! - **Relay state**: `state_l<n>` as `ON`/`OFF`, or booleans for binary inputs
//! - **Switch configuration**: switch type, actions, output link and bind
//!   command per input channel
//! - **Analog channels**: sensors, counters and dimmers on `l1`..`l16`
//! - **Buttons**: `single`, `double`, `triple`, `hold` and `release` actions
//! - **Battery**: level and voltage
//!
//! The library never talks to the radio itself. Outbound conversions produce
//! [`ZclRequest`](zcl::ZclRequest)s that are carried out by the hub's
//! implementation of [`Entity`](converter::Entity).
//!
//! # Quick Start
//!
//! ## Converting a report
//!
//! ```
//! use std::sync::Arc;
//!
//! use ptvo_rc4::DeviceDefinition;
//! use ptvo_rc4::converter::LegacyButtons;
//! use ptvo_rc4::zcl::{AttributeReport, Cluster, DeviceInfo, EndpointInfo, MessageKind, attr};
//!
//! let definition = DeviceDefinition::ptvo_rc4(Arc::new(LegacyButtons));
//! let device = DeviceInfo::new().with_endpoint(EndpointInfo::new(2));
//!
//! let report = AttributeReport::new(Cluster::GenOnOffSwitchCfg, MessageKind::ReadResponse, 2)
//!     .with(attr::SWITCH_TYPE, 1);
//! let state = definition.convert_report(&device, &report);
//!
//! assert_eq!(state.to_json().to_string(), r#"{"switch_type_l2":"single click"}"#);
//! ```
//!
//! ## Changing an option
//!
//! ```
//! use std::sync::Arc;
//!
//! use ptvo_rc4::DeviceDefinition;
//! use ptvo_rc4::converter::LegacyButtons;
//! use ptvo_rc4::zcl::{Cluster, DeviceInfo, EndpointInfo, ZclRequest};
//! use serde_json::json;
//!
//! let definition = DeviceDefinition::ptvo_rc4(Arc::new(LegacyButtons));
//! let device = DeviceInfo::new().with_endpoint(EndpointInfo::new(1));
//!
//! let requests = definition.set_requests(&device, "bind_command_l3", &json!("toggle"))?;
//! assert_eq!(requests.len(), 1);
//! assert_eq!(requests[0].endpoint(), 3);
//! assert_eq!(requests[0].cluster(), Cluster::GenOnOffSwitchCfg);
//! # Ok::<(), ptvo_rc4::Error>(())
//! ```

pub mod converter;
pub mod definition;
pub mod error;
pub mod exposes;
pub mod state;
pub mod types;
pub mod zcl;

pub use converter::{Entity, FromZigbee, ToZigbee};
pub use definition::{DefinitionBuilder, DeviceDefinition, DeviceMeta};
pub use error::{ConvertError, Error, ProtocolError, Result, ValueError};
pub use exposes::{Access, Expose};
pub use state::{PublishedState, StateValue};
