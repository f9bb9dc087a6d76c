// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end tests of the `ptvo.rc4` definition against a recording entity.

use std::sync::Arc;

use parking_lot::Mutex;
use ptvo_rc4::converter::{LegacyButtons, OnOff};
use ptvo_rc4::types::{BIND_COMMANDS, INPUT_LINK, SWITCH_ACTIONS, SWITCH_TYPES};
use ptvo_rc4::zcl::{
    AttributeId, AttributeReport, Cluster, DataType, DeviceInfo, EndpointInfo, MessageKind,
    ReportingConfig, WritePayload, ZclRequest, attr,
};
use ptvo_rc4::{ConvertError, DeviceDefinition, Entity, Error, ProtocolError};
use serde_json::{Value, json};

/// Records operations in the order they are carried out.
#[derive(Debug, Default)]
struct Recorder {
    log: Mutex<Vec<String>>,
    reject_writes: Option<u8>,
}

impl Recorder {
    fn rejecting_writes(status: u8) -> Self {
        Self {
            log: Mutex::new(Vec::new()),
            reject_writes: Some(status),
        }
    }

    fn log(&self) -> Vec<String> {
        self.log.lock().clone()
    }
}

impl Entity for Recorder {
    async fn read(
        &self,
        endpoint: u8,
        cluster: Cluster,
        attributes: &[AttributeId],
    ) -> Result<(), ProtocolError> {
        let names: Vec<_> = attributes.iter().map(|a| a.key().into_owned()).collect();
        self.log
            .lock()
            .push(format!("read {endpoint} {cluster} {}", names.join(",")));
        Ok(())
    }

    async fn write(
        &self,
        endpoint: u8,
        cluster: Cluster,
        payload: &WritePayload,
    ) -> Result<(), ProtocolError> {
        if let Some(status) = self.reject_writes {
            return Err(ProtocolError::Status(status));
        }
        let body = serde_json::to_string(payload).map_err(|e| ProtocolError::Delivery(e.to_string()))?;
        self.log
            .lock()
            .push(format!("write {endpoint} {cluster} {body}"));
        Ok(())
    }

    async fn command(
        &self,
        endpoint: u8,
        cluster: Cluster,
        command: &'static str,
        payload: &Value,
    ) -> Result<(), ProtocolError> {
        self.log
            .lock()
            .push(format!("command {endpoint} {cluster} {command} {payload}"));
        Ok(())
    }

    async fn configure_reporting(
        &self,
        endpoint: u8,
        cluster: Cluster,
        items: &[ReportingConfig],
    ) -> Result<(), ProtocolError> {
        let body = serde_json::to_string(items).map_err(|e| ProtocolError::Delivery(e.to_string()))?;
        self.log
            .lock()
            .push(format!("configure {endpoint} {cluster} {body}"));
        Ok(())
    }
}

fn definition() -> DeviceDefinition {
    DeviceDefinition::ptvo_rc4(Arc::new(LegacyButtons))
}

fn device() -> DeviceInfo {
    let mut device = DeviceInfo::new();
    for id in 1..=4 {
        device = device.with_endpoint(
            EndpointInfo::new(id)
                .with_input(Cluster::GenOnOff)
                .with_input(Cluster::GenOnOffSwitchCfg)
                .with_input(Cluster::GenMultistateInput),
        );
    }
    device
        .with_endpoint(EndpointInfo::new(6).with_input(Cluster::GenAnalogInput))
        .with_endpoint(EndpointInfo::new(7).with_input(Cluster::GenAnalogInput))
        .with_endpoint(EndpointInfo::new(8).with_input(Cluster::GenAnalogInput))
}

// ============================================================================
// Enumeration tables
// ============================================================================

mod tables {
    use super::*;

    #[test]
    fn every_name_round_trips() {
        for table in [&SWITCH_TYPES, &SWITCH_ACTIONS, &INPUT_LINK, &BIND_COMMANDS] {
            for &(name, _) in table.entries() {
                let code = table.code_for_str(name).unwrap();
                assert_eq!(table.name_for_code(code), Some(name), "{}", table.key());
            }
        }
    }

    #[test]
    fn sorted_names_ascend_by_code() {
        for table in [&SWITCH_TYPES, &SWITCH_ACTIONS, &INPUT_LINK, &BIND_COMMANDS] {
            let codes: Vec<u8> = table
                .sorted_names()
                .into_iter()
                .map(|name| table.code_for_str(name).unwrap())
                .collect();
            assert!(codes.windows(2).all(|w| w[0] < w[1]), "{}", table.key());
        }
    }
}

// ============================================================================
// Inbound
// ============================================================================

mod inbound {
    use super::*;

    fn on_off(endpoint: u8, value: u8) -> AttributeReport {
        AttributeReport::new(Cluster::GenOnOff, MessageKind::AttributeReport, endpoint)
            .with(attr::ON_OFF, value)
    }

    #[test]
    fn on_off_publishes_on_and_off_strings() {
        let definition = definition();
        let device = device();

        let state = definition.convert_report(&device, &on_off(6, 1));
        assert_eq!(state.to_json(), json!({"state_l6": "ON"}));

        let state = definition.convert_report(&device, &on_off(6, 0));
        assert_eq!(state.to_json(), json!({"state_l6": "OFF"}));
    }

    #[test]
    fn binary_endpoint_publishes_boolean() {
        let definition = DeviceDefinition::builder("ptvo.switch")
            .from_zigbee(Arc::new(OnOff))
            .binary_endpoint("l6", "contact")
            .build();

        let state = definition.convert_report(&device(), &on_off(6, 1));
        assert_eq!(state.to_json(), json!({"contact_l6": true}));
    }

    #[test]
    fn switch_config_omits_absent_attributes() {
        let report =
            AttributeReport::new(Cluster::GenOnOffSwitchCfg, MessageKind::ReadResponse, 3)
                .with(attr::SWITCH_TYPE, 2)
                .with(attr::BIND_COMMAND, 0x0B);

        let state = definition().convert_report(&device(), &report);
        assert_eq!(
            state.to_json(),
            json!({"switch_type_l3": "multi-click", "bind_command_l3": "recall scene 5"})
        );
        assert!(!state.contains("switch_actions_l3"));
    }

    #[test]
    fn switch_config_marks_unknown_codes() {
        let report =
            AttributeReport::new(Cluster::GenOnOffSwitchCfg, MessageKind::AttributeReport, 1)
                .with(attr::LINK_TO_OUTPUT, 7);

        let state = definition().convert_report(&device(), &report);
        assert_eq!(state.to_json(), json!({"link_to_output_l1": null}));
    }

    #[test]
    fn switch_config_keeps_good_fields_next_to_bad_ones() {
        let report =
            AttributeReport::new(Cluster::GenOnOffSwitchCfg, MessageKind::AttributeReport, 1)
                .with(attr::SWITCH_TYPE, 1.0)
                .with(attr::BIND_COMMAND, "x");

        let state = definition().convert_report(&device(), &report);
        assert_eq!(
            state.to_json(),
            json!({"switch_type_l1": "single click", "bind_command_l1": null})
        );
    }

    #[test]
    fn button_press_publishes_action_and_click() {
        let report =
            AttributeReport::new(Cluster::GenMultistateInput, MessageKind::AttributeReport, 2)
                .with(attr::PRESENT_VALUE, 1);

        let state = definition().convert_report(&device(), &report);
        assert_eq!(
            state.to_json(),
            json!({"action": "single_l2", "click": "l2_single"})
        );
    }

    #[test]
    fn uptime_channel_is_analog() {
        let report = AttributeReport::new(Cluster::GenAnalogInput, MessageKind::AttributeReport, 7)
            .with(attr::PRESENT_VALUE, 3600);

        let state = definition().convert_report(&device(), &report);
        assert_eq!(state.to_json(), json!({"l7": 3600.0}));
    }

    #[test]
    fn basic_reports_are_swallowed() {
        let report = AttributeReport::new(Cluster::GenBasic, MessageKind::AttributeReport, 1)
            .with(AttributeId::Name("modelId"), "ptvo.rc4");

        assert!(definition().convert_report(&device(), &report).is_empty());
    }

    #[test]
    fn battery_report() {
        let report = AttributeReport::new(Cluster::GenPowerCfg, MessageKind::AttributeReport, 1)
            .with(attr::BATTERY_PERCENTAGE_REMAINING, 200)
            .with(attr::BATTERY_VOLTAGE, 29);

        let state = definition().convert_report(&device(), &report);
        assert_eq!(state.to_json(), json!({"battery": 100.0, "voltage": 2900.0}));
    }
}

// ============================================================================
// Outbound
// ============================================================================

mod outbound {
    use super::*;

    #[test]
    fn switch_type_set_writes_schema_attribute() {
        let requests = definition()
            .set_requests(&device(), "switch_type", &json!("multi-click"))
            .unwrap();

        let [ZclRequest::Write { payload, .. }] = requests.as_slice() else {
            panic!("expected one write, got {requests:?}");
        };
        assert_eq!(serde_json::to_value(payload).unwrap(), json!({"switchType": 2}));
    }

    #[test]
    fn link_to_output_set_is_typed_uint8() {
        let requests = definition()
            .set_requests(&device(), "link_to_output_l2", &json!("yes"))
            .unwrap();

        let [ZclRequest::Write { endpoint, payload, .. }] = requests.as_slice() else {
            panic!("expected one write, got {requests:?}");
        };
        assert_eq!(*endpoint, 2);
        let value = payload.get(&attr::LINK_TO_OUTPUT).unwrap();
        assert_eq!(value.data_type(), Some(DataType::Uint8));
        assert_eq!(value.value(), &json!(1));
    }

    #[test]
    fn unknown_key_fails() {
        let err = definition()
            .set_requests(&device(), "switch_colour_l1", &json!("red"))
            .unwrap_err();
        assert!(matches!(err, Error::Convert(ConvertError::UnsupportedKey(_))));
    }

    #[tokio::test]
    async fn set_writes_through_entity() {
        let entity = Recorder::default();
        definition()
            .set(&entity, &device(), "bind_command_l4", &json!("recall scene 2"))
            .await
            .unwrap();

        assert_eq!(
            entity.log(),
            [r#"write 4 genOnOffSwitchCfg {"16386":{"value":8,"type":32}}"#]
        );
    }

    #[tokio::test]
    async fn get_reads_all_switch_attributes() {
        let entity = Recorder::default();
        definition()
            .get(&entity, &device(), "switch_actions_l1")
            .await
            .unwrap();

        assert_eq!(
            entity.log(),
            ["read 1 genOnOffSwitchCfg switchType,switchActions,16385,16386"]
        );
    }

    #[tokio::test]
    async fn trigger_and_interval() {
        let entity = Recorder::default();
        let definition = definition();
        let device = device();

        definition
            .set(&entity, &device, "trigger_l3", &json!(20))
            .await
            .unwrap();
        definition
            .set(&entity, &device, "interval_l3", &json!("30"))
            .await
            .unwrap();

        assert_eq!(
            entity.log(),
            [
                r#"command 3 genOnOff onWithTimedOff {"ctrlbits":0,"offwaittime":0,"ontime":20}"#,
                r#"configure 3 genOnOff [{"attribute":"onOff","minimumReportInterval":30,"maximumReportInterval":30,"reportableChange":0}]"#,
            ]
        );
    }

    #[tokio::test]
    async fn signal_level_is_writable() {
        let entity = Recorder::default();
        definition()
            .set(&entity, &device(), "l8", &json!(12))
            .await
            .unwrap();
        definition().get(&entity, &device(), "l8").await.unwrap();

        assert_eq!(
            entity.log(),
            [
                r#"write 8 genAnalogInput {"presentValue":12.0}"#,
                "read 8 genAnalogInput presentValue,description",
            ]
        );
    }

    #[tokio::test]
    async fn transport_errors_surface_unchanged() {
        let entity = Recorder::rejecting_writes(0x86);
        let err = definition()
            .set(&entity, &device(), "switch_type_l1", &json!("switch"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Protocol(ProtocolError::Status(0x86))));
        assert!(entity.log().is_empty());
    }

    #[tokio::test]
    async fn invalid_value_sends_nothing() {
        let entity = Recorder::default();
        let err = definition()
            .set(&entity, &device(), "switch_type_l1", &json!("sometimes"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Value(_)));
        assert!(entity.log().is_empty());
    }
}
