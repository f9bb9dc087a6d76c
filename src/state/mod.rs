// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State published to the hub.
//!
//! Inbound converters turn attribute reports into a [`PublishedState`]: an
//! ordered list of channel-qualified fields such as `state_l1` or
//! `switch_type_l2`. Field names are built with [`field_name`] rather than
//! assembled ad hoc.
//!
//! # Examples
//!
//! ```
//! use ptvo_rc4::state::{field_name, PublishedState, StateValue};
//!
//! let mut state = PublishedState::new();
//! state.insert(field_name("state", "l6"), "ON");
//!
//! assert_eq!(state.get("state_l6"), Some(&StateValue::from("ON")));
//! assert_eq!(state.to_json().to_string(), r#"{"state_l6":"ON"}"#);
//! ```

mod published_state;

pub use published_state::{PublishedState, StateValue, field_name};
