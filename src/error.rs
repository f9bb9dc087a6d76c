// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `ptvo.rc4` device profile.
//!
//! Inbound conversion never fails: a report that does not carry what a
//! converter needs simply yields no state. Errors only arise on the outbound
//! path, when a requested option cannot be encoded or when the transport
//! rejects the resulting request.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A requested value could not be encoded.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The request could not be turned into device operations.
    #[error("convert error: {0}")]
    Convert(#[from] ConvertError),

    /// The transport failed to deliver a request.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

/// Errors raised while encoding a requested value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
        /// The actual value that was provided.
        actual: i64,
    },

    /// The value is neither a known option name nor an integer code.
    #[error("invalid value {value} for option {option}")]
    InvalidOption {
        /// The option key the value was meant for.
        option: &'static str,
        /// The rejected input, rendered as JSON.
        value: String,
    },
}

/// Errors raised while mapping a hub request onto device operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// No outbound converter of this device handles the key.
    #[error("unsupported key: {0}")]
    UnsupportedKey(String),

    /// The key handler does not support reading the value back.
    #[error("key {0} cannot be read from the device")]
    GetNotSupported(String),
}

/// Errors reported by the transport behind an [`Entity`](crate::converter::Entity).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The device did not answer in time.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The device answered with a non-success ZCL status.
    #[error("device returned status 0x{0:02x}")]
    Status(u8),

    /// The request could not be sent.
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
