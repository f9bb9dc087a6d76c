// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Converters between Zigbee attributes and hub state.
//!
//! Inbound converters ([`FromZigbee`]) turn an [`AttributeReport`] into
//! published fields. Outbound converters ([`ToZigbee`]) turn a requested
//! `(key, value)` into [`ZclRequest`]s; [`dispatch`] hands those to the
//! hub's [`Entity`].
//!
//! | Converter | Direction | Cluster | Keys / fields |
//! |-----------|-----------|---------|---------------|
//! | [`IgnoreBasicReport`] | in | `genBasic` | - |
//! | [`Battery`] | in | `genPowerCfg` | `battery`, `voltage` |
//! | [`OnOff`] | in | `genOnOff` | `state_<ch>` or `<binary prefix>_<ch>` |
//! | [`SwitchConfig`] | in/out | `genOnOffSwitchCfg` | `switch_type`, `switch_actions`, `link_to_output`, `bind_command` |
//! | [`AnalogInput`] | in/out | `genAnalogInput` | `l1`..`l16` |
//! | [`MultistateAction`] | in | `genMultistateInput` | `action` |
//! | [`LegacyButtons`] | in | `genMultistateInput` | `click` |
//! | [`SwitchTrigger`] | out | `genOnOff` | `trigger`, `interval` |

mod analog_input;
mod basic;
mod battery;
mod multistate;
mod on_off;
mod switch_config;
mod trigger;

pub use analog_input::AnalogInput;
pub use basic::IgnoreBasicReport;
pub use battery::Battery;
pub use multistate::{LegacyButtons, MultistateAction};
pub use on_off::OnOff;
pub use switch_config::SwitchConfig;
pub use trigger::SwitchTrigger;

use std::fmt::Debug;

use serde_json::Value;

use crate::definition::DeviceMeta;
use crate::error::{ConvertError, ProtocolError, Result};
use crate::state::PublishedState;
use crate::types::{EndpointTable, channel_name};
use crate::zcl::{
    AttributeId, AttributeReport, Cluster, DeviceInfo, MessageKind, ReportingConfig,
    WritePayload, ZclRequest,
};

/// What a converter may consult besides the message itself.
#[derive(Debug, Clone, Copy)]
pub struct ConvertContext<'a> {
    /// Static metadata of the device model.
    pub meta: &'a DeviceMeta,
    /// Channel name to endpoint id table of the model.
    pub endpoints: &'a EndpointTable,
    /// Endpoint layout of the paired device.
    pub device: &'a DeviceInfo,
}

impl ConvertContext<'_> {
    /// Returns the channel name of `endpoint`, from the model's table when
    /// listed there and `l<endpoint>` otherwise.
    #[must_use]
    pub fn channel(&self, endpoint: u8) -> String {
        self.endpoints
            .name_of(endpoint)
            .map_or_else(|| channel_name(endpoint), str::to_string)
    }
}

/// Converts inbound attribute messages to published state.
pub trait FromZigbee: Debug + Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Cluster this converter listens to.
    fn cluster(&self) -> Cluster;

    /// Message kinds this converter handles.
    fn kinds(&self) -> &'static [MessageKind] {
        &[MessageKind::AttributeReport, MessageKind::ReadResponse]
    }

    /// Returns `true` if the converter should see `report`.
    fn matches(&self, report: &AttributeReport) -> bool {
        report.cluster() == self.cluster() && self.kinds().contains(&report.kind())
    }

    /// Converts a report.
    ///
    /// Returns `None` when the report does not carry what this converter
    /// needs.
    fn convert(&self, ctx: &ConvertContext<'_>, report: &AttributeReport)
    -> Option<PublishedState>;
}

/// Converts requested option changes to device operations.
pub trait ToZigbee: Debug + Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Option keys this converter handles.
    fn keys(&self) -> &'static [&'static str];

    /// Returns `true` if the converter handles `key`.
    fn handles(&self, key: &str) -> bool {
        self.keys().contains(&key)
    }

    /// Builds the operations that apply `value` to `key` on `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not handled or the value cannot be
    /// encoded.
    fn convert_set(
        &self,
        ctx: &ConvertContext<'_>,
        endpoint: u8,
        key: &str,
        value: &Value,
    ) -> Result<Vec<ZclRequest>>;

    /// Builds the operations that refresh `key` from `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::GetNotSupported` unless overridden.
    fn convert_get(
        &self,
        ctx: &ConvertContext<'_>,
        endpoint: u8,
        key: &str,
    ) -> Result<Vec<ZclRequest>> {
        let _ = (ctx, endpoint);
        Err(ConvertError::GetNotSupported(key.to_string()).into())
    }
}

/// Communication handle to a paired device, provided by the hub.
///
/// The hub owns addressing, retries and timeouts; implementations report the
/// final outcome of each operation.
#[allow(async_fn_in_trait)]
pub trait Entity {
    /// Reads attributes from a cluster.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the read fails.
    async fn read(
        &self,
        endpoint: u8,
        cluster: Cluster,
        attributes: &[AttributeId],
    ) -> std::result::Result<(), ProtocolError>;

    /// Writes attributes to a cluster.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the write fails.
    async fn write(
        &self,
        endpoint: u8,
        cluster: Cluster,
        payload: &WritePayload,
    ) -> std::result::Result<(), ProtocolError>;

    /// Sends a cluster command.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the command fails.
    async fn command(
        &self,
        endpoint: u8,
        cluster: Cluster,
        command: &'static str,
        payload: &Value,
    ) -> std::result::Result<(), ProtocolError>;

    /// Configures attribute reporting.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the configuration is rejected.
    async fn configure_reporting(
        &self,
        endpoint: u8,
        cluster: Cluster,
        items: &[ReportingConfig],
    ) -> std::result::Result<(), ProtocolError>;
}

/// Carries out `requests` in order, stopping at the first failure.
///
/// # Errors
///
/// Returns the `ProtocolError` of the first failing request.
pub async fn dispatch<E: Entity>(
    entity: &E,
    requests: &[ZclRequest],
) -> std::result::Result<(), ProtocolError> {
    for request in requests {
        tracing::debug!(
            endpoint = request.endpoint(),
            cluster = %request.cluster(),
            operation = request.operation(),
            "Sending request"
        );
        let outcome = match request {
            ZclRequest::Read {
                endpoint,
                cluster,
                attributes,
            } => entity.read(*endpoint, *cluster, attributes).await,
            ZclRequest::Write {
                endpoint,
                cluster,
                payload,
            } => entity.write(*endpoint, *cluster, payload).await,
            ZclRequest::Command {
                endpoint,
                cluster,
                command,
                payload,
            } => entity.command(*endpoint, *cluster, command, payload).await,
            ZclRequest::ConfigureReporting {
                endpoint,
                cluster,
                items,
            } => entity.configure_reporting(*endpoint, *cluster, items).await,
        };
        if let Err(e) = outcome {
            tracing::warn!(
                endpoint = request.endpoint(),
                cluster = %request.cluster(),
                error = %e,
                "Request failed"
            );
            return Err(e);
        }
    }
    Ok(())
}

/// Reads a hub value as an integer, the way loosely typed hubs send them:
/// JSON numbers (fractions truncated) or numeric strings.
pub(crate) fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
        Value::String(s) => {
            let s = s.trim();
            s.parse()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    }
}

/// Reads a hub value as a float: JSON numbers or numeric strings.
pub(crate) fn parse_float(value: &Value) -> Option<f64> {
    let parsed: Option<f64> = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

// Values beyond i64 are rejected instead of saturating.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn truncate(value: f64) -> Option<i64> {
    let t = value.trunc();
    (t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64).then_some(t as i64)
}

/// Rounds to `digits` decimal places.
pub(crate) fn precision_round(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

#[cfg(test)]
pub(crate) mod testing {
    use parking_lot::Mutex;

    use super::*;

    /// Entity that records every request and optionally fails writes.
    #[derive(Debug, Default)]
    pub struct RecordingEntity {
        pub requests: Mutex<Vec<ZclRequest>>,
        pub fail_writes: Option<ProtocolError>,
    }

    impl Entity for RecordingEntity {
        async fn read(
            &self,
            endpoint: u8,
            cluster: Cluster,
            attributes: &[AttributeId],
        ) -> std::result::Result<(), ProtocolError> {
            self.requests.lock().push(ZclRequest::Read {
                endpoint,
                cluster,
                attributes: attributes.to_vec(),
            });
            Ok(())
        }

        async fn write(
            &self,
            endpoint: u8,
            cluster: Cluster,
            payload: &WritePayload,
        ) -> std::result::Result<(), ProtocolError> {
            if let Some(e) = &self.fail_writes {
                return Err(e.clone());
            }
            self.requests.lock().push(ZclRequest::Write {
                endpoint,
                cluster,
                payload: payload.clone(),
            });
            Ok(())
        }

        async fn command(
            &self,
            endpoint: u8,
            cluster: Cluster,
            command: &'static str,
            payload: &Value,
        ) -> std::result::Result<(), ProtocolError> {
            self.requests.lock().push(ZclRequest::Command {
                endpoint,
                cluster,
                command,
                payload: payload.clone(),
            });
            Ok(())
        }

        async fn configure_reporting(
            &self,
            endpoint: u8,
            cluster: Cluster,
            items: &[ReportingConfig],
        ) -> std::result::Result<(), ProtocolError> {
            self.requests.lock().push(ZclRequest::ConfigureReporting {
                endpoint,
                cluster,
                items: items.to_vec(),
            });
            Ok(())
        }
    }

    pub fn context<'a>(
        meta: &'a DeviceMeta,
        endpoints: &'a EndpointTable,
        device: &'a DeviceInfo,
    ) -> ConvertContext<'a> {
        ConvertContext {
            meta,
            endpoints,
            device,
        }
    }
}
