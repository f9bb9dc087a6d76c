// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bidirectional name/code tables for enumerated firmware options.

use serde_json::Value;

use crate::converter::parse_int;
use crate::error::ValueError;

/// A closed set of option names, each mapped to a one-byte attribute code.
///
/// Every name and every code is unique within a table, so decoding a code
/// back to its name is unambiguous.
///
/// # Examples
///
/// ```
/// use ptvo_rc4::types::SWITCH_ACTIONS;
///
/// assert_eq!(SWITCH_ACTIONS.sorted_names(), vec!["on", "off", "toggle"]);
/// assert_eq!(SWITCH_ACTIONS.name_for_code(0x02), Some("toggle"));
/// assert_eq!(SWITCH_ACTIONS.name_for_code(0x07), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionTable {
    key: &'static str,
    entries: &'static [(&'static str, u8)],
}

impl OptionTable {
    /// Creates a table for the option `key`.
    #[must_use]
    pub const fn new(key: &'static str, entries: &'static [(&'static str, u8)]) -> Self {
        Self { key, entries }
    }

    /// Returns the option key this table belongs to.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Returns the raw `(name, code)` entries in declaration order.
    #[must_use]
    pub const fn entries(&self) -> &'static [(&'static str, u8)] {
        self.entries
    }

    /// Returns the option names ordered by ascending code.
    #[must_use]
    pub fn sorted_names(&self) -> Vec<&'static str> {
        let mut entries = self.entries.to_vec();
        entries.sort_by_key(|&(_, code)| code);
        entries.into_iter().map(|(name, _)| name).collect()
    }

    /// Returns the name registered for `code`, if any.
    #[must_use]
    pub fn name_for_code(&self, code: u8) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|&&(_, c)| c == code)
            .map(|&(name, _)| name)
    }

    /// Resolves a textual option to its code.
    ///
    /// A known name wins; otherwise the text is read as a decimal code, which
    /// lets callers send raw codes the table does not list.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidOption` if the text is neither a name nor
    /// an integer, and `ValueError::OutOfRange` if the integer does not fit a
    /// byte.
    pub fn code_for_str(&self, input: &str) -> Result<u8, ValueError> {
        if let Some(&(_, code)) = self.entries.iter().find(|&&(name, _)| name == input) {
            return Ok(code);
        }

        let raw: i64 = input
            .trim()
            .parse()
            .map_err(|_| self.invalid(&Value::String(input.to_string())))?;
        Self::to_code(raw)
    }

    /// Resolves a JSON option value (name or number) to its code.
    ///
    /// # Errors
    ///
    /// Same as [`code_for_str`](Self::code_for_str); numbers must be
    /// integral (`2` or `2.0`), and any JSON type other than a string or a
    /// number is rejected.
    pub fn code_for_name(&self, value: &Value) -> Result<u8, ValueError> {
        match value {
            Value::String(s) => self.code_for_str(s),
            Value::Number(n) => n
                .as_f64()
                .filter(|f| f.fract() == 0.0)
                .and_then(|_| parse_int(value))
                .ok_or_else(|| self.invalid(value))
                .and_then(Self::to_code),
            _ => Err(self.invalid(value)),
        }
    }

    fn to_code(raw: i64) -> Result<u8, ValueError> {
        u8::try_from(raw).map_err(|_| ValueError::OutOfRange {
            min: 0,
            max: i64::from(u8::MAX),
            actual: raw,
        })
    }

    fn invalid(&self, value: &Value) -> ValueError {
        ValueError::InvalidOption {
            option: self.key,
            value: value.to_string(),
        }
    }
}
