// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Endpoint layout of a paired device instance.

use serde::Deserialize;

use super::Cluster;

/// Clusters offered by one endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointInfo {
    /// Endpoint id.
    #[serde(rename = "ID", alias = "id")]
    pub id: u8,
    /// Server-side cluster ids.
    #[serde(default)]
    pub input_clusters: Vec<u16>,
    /// Client-side cluster ids.
    #[serde(default)]
    pub output_clusters: Vec<u16>,
}

impl EndpointInfo {
    /// Creates an endpoint without clusters.
    #[must_use]
    pub fn new(id: u8) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Adds a server-side cluster.
    #[must_use]
    pub fn with_input(mut self, cluster: Cluster) -> Self {
        self.input_clusters.push(cluster.id());
        self
    }

    /// Adds a client-side cluster.
    #[must_use]
    pub fn with_output(mut self, cluster: Cluster) -> Self {
        self.output_clusters.push(cluster.id());
        self
    }

    /// Returns `true` if the endpoint offers `cluster` on either side.
    #[must_use]
    pub fn supports(&self, cluster: Cluster) -> bool {
        let id = cluster.id();
        self.input_clusters.contains(&id) || self.output_clusters.contains(&id)
    }
}

/// What the hub knows about a paired device: its endpoints and clusters.
///
/// The firmware is configurable, so the same model can expose different
/// clusters on each endpoint; converters consult this before choosing how
/// to talk to a channel.
///
/// # Examples
///
/// ```
/// use ptvo_rc4::zcl::{Cluster, DeviceInfo, EndpointInfo};
///
/// let device = DeviceInfo::new()
///     .with_endpoint(EndpointInfo::new(1).with_input(Cluster::GenOnOff))
///     .with_endpoint(EndpointInfo::new(8).with_input(Cluster::GenAnalogInput));
///
/// assert!(device.has_endpoint(8));
/// assert!(device.supports(8, Cluster::GenAnalogInput));
/// assert!(!device.supports(1, Cluster::GenLevelCtrl));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeviceInfo {
    /// Endpoints, in the order the device announced them.
    #[serde(default)]
    pub endpoints: Vec<EndpointInfo>,
}

impl DeviceInfo {
    /// Creates a device without endpoints.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: EndpointInfo) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    /// Returns the endpoint with id `id`.
    #[must_use]
    pub fn endpoint(&self, id: u8) -> Option<&EndpointInfo> {
        self.endpoints.iter().find(|e| e.id == id)
    }

    /// Returns `true` if the device has endpoint `id`.
    #[must_use]
    pub fn has_endpoint(&self, id: u8) -> bool {
        self.endpoint(id).is_some()
    }

    /// Returns `true` if endpoint `id` offers `cluster`.
    #[must_use]
    pub fn supports(&self, id: u8, cluster: Cluster) -> bool {
        self.endpoint(id).is_some_and(|e| e.supports(cluster))
    }

    /// Returns the endpoint requests go to when none is named.
    #[must_use]
    pub fn default_endpoint(&self) -> u8 {
        self.endpoints.first().map_or(1, |e| e.id)
    }
}
