// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device operations produced by outbound converters.

use serde_json::Value;

use super::{AttributeId, Cluster, ReportingConfig, WritePayload};

/// One operation to perform on a device endpoint.
///
/// Converters only describe operations; they are carried out by an
/// [`Entity`](crate::converter::Entity) supplied by the hub.
#[derive(Debug, Clone, PartialEq)]
pub enum ZclRequest {
    /// Read attributes.
    Read {
        /// Target endpoint id.
        endpoint: u8,
        /// Cluster to read from.
        cluster: Cluster,
        /// Attributes to read.
        attributes: Vec<AttributeId>,
    },
    /// Write attributes.
    Write {
        /// Target endpoint id.
        endpoint: u8,
        /// Cluster to write to.
        cluster: Cluster,
        /// Attribute values.
        payload: WritePayload,
    },
    /// Send a cluster command.
    Command {
        /// Target endpoint id.
        endpoint: u8,
        /// Cluster the command belongs to.
        cluster: Cluster,
        /// Command name.
        command: &'static str,
        /// Command arguments.
        payload: Value,
    },
    /// Configure attribute reporting.
    ConfigureReporting {
        /// Target endpoint id.
        endpoint: u8,
        /// Cluster of the reported attributes.
        cluster: Cluster,
        /// Reporting settings.
        items: Vec<ReportingConfig>,
    },
}

impl ZclRequest {
    /// Returns the target endpoint id.
    #[must_use]
    pub const fn endpoint(&self) -> u8 {
        match self {
            Self::Read { endpoint, .. }
            | Self::Write { endpoint, .. }
            | Self::Command { endpoint, .. }
            | Self::ConfigureReporting { endpoint, .. } => *endpoint,
        }
    }

    /// Returns the target cluster.
    #[must_use]
    pub const fn cluster(&self) -> Cluster {
        match self {
            Self::Read { cluster, .. }
            | Self::Write { cluster, .. }
            | Self::Command { cluster, .. }
            | Self::ConfigureReporting { cluster, .. } => *cluster,
        }
    }

    /// Returns a short name of the operation, for logging.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Read { .. } => "read",
            Self::Write { .. } => "write",
            Self::Command { .. } => "command",
            Self::ConfigureReporting { .. } => "configure_reporting",
        }
    }
}
