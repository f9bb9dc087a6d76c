// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde_json::{Value, json};

use super::{ConvertContext, ToZigbee, parse_int};
use crate::error::{ConvertError, Result, ValueError};
use crate::zcl::{Cluster, ReportingConfig, ZclRequest, attr};

const KEYS: &[&str] = &["trigger", "interval"];

/// Pulses an output (`trigger`, in tenths of a second) or sets the fixed
/// reporting interval of a channel (`interval`, in seconds).
///
/// A zero or non-numeric value sends nothing; both values must fit the
/// 16-bit attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwitchTrigger;

impl ToZigbee for SwitchTrigger {
    fn name(&self) -> &'static str {
        "ptvo_switch_trigger"
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
        if !self.handles(key) {
            return Err(ConvertError::UnsupportedKey(key.to_string()).into());
        }
        let Some(amount) = parse_int(value).filter(|v| *v != 0) else {
            tracing::debug!(key, %value, "Nothing to send");
            return Ok(Vec::new());
        };

        let amount = u16::try_from(amount).map_err(|_| ValueError::OutOfRange {
            min: 0,
            max: i64::from(u16::MAX),
            actual: amount,
        })?;

        let request = if key == "trigger" {
            ZclRequest::Command {
                endpoint,
                cluster: Cluster::GenOnOff,
                command: "onWithTimedOff",
                payload: json!({"ctrlbits": 0, "ontime": amount, "offwaittime": 0}),
            }
        } else {
            ZclRequest::ConfigureReporting {
                endpoint,
                cluster: Cluster::GenOnOff,
                items: vec![ReportingConfig::fixed_interval(attr::ON_OFF, amount)],
            }
        };
        Ok(vec![request])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::testing::context;
    use crate::definition::DeviceMeta;
    use crate::error::Error;
    use crate::types::EndpointTable;
    use crate::zcl::DeviceInfo;

    fn set(endpoint: u8, key: &str, value: &Value) -> Result<Vec<ZclRequest>> {
        let meta = DeviceMeta::default();
        let endpoints = EndpointTable::new();
        let device = DeviceInfo::new();
        SwitchTrigger.convert_set(&context(&meta, &endpoints, &device), endpoint, key, value)
    }

    #[test]
    fn trigger_sends_timed_on() {
        let requests = set(2, "trigger", &json!("15")).unwrap();
        assert_eq!(
            requests,
            vec![ZclRequest::Command {
                endpoint: 2,
                cluster: Cluster::GenOnOff,
                command: "onWithTimedOff",
                payload: json!({"ctrlbits": 0, "ontime": 15, "offwaittime": 0}),
            }]
        );
    }

    #[test]
    fn interval_configures_reporting() {
        let requests = set(1, "interval", &json!(60)).unwrap();
        assert_eq!(
            requests,
            vec![ZclRequest::ConfigureReporting {
                endpoint: 1,
                cluster: Cluster::GenOnOff,
                items: vec![ReportingConfig::fixed_interval(attr::ON_OFF, 60)],
            }]
        );
    }

    #[test]
    fn zero_or_garbage_sends_nothing() {
        assert!(set(1, "trigger", &json!(0)).unwrap().is_empty());
        assert!(set(1, "interval", &json!("soon")).unwrap().is_empty());
    }

    #[test]
    fn interval_must_fit_sixteen_bits() {
        let err = set(1, "interval", &json!(70_000)).unwrap_err();
        assert!(matches!(
            err,
            Error::Value(ValueError::OutOfRange { actual: 70_000, .. })
        ));
    }

    #[test]
    fn trigger_must_fit_sixteen_bits() {
        for value in [json!(-5), json!(65_536)] {
            let err = set(1, "trigger", &value).unwrap_err();
            assert!(matches!(err, Error::Value(ValueError::OutOfRange { max: 65_535, .. })));
        }
        assert_eq!(set(1, "trigger", &json!(65_535)).unwrap().len(), 1);
    }

    #[test]
    fn get_is_not_supported() {
        let meta = DeviceMeta::default();
        let endpoints = EndpointTable::new();
        let device = DeviceInfo::new();
        let err = SwitchTrigger
            .convert_get(&context(&meta, &endpoints, &device), 1, "trigger")
            .unwrap_err();
        assert!(matches!(err, Error::Convert(ConvertError::GetNotSupported(_))));
    }
}
