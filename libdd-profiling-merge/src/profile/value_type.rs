// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// Describes one measurement dimension of a profile, e.g. "cpu" measured in
/// "nanoseconds". Two value types are equal iff both strings match exactly.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ValueType {
    pub r#type: String,
    pub unit: String,
}

impl ValueType {
    #[inline(always)]
    pub fn new(r#type: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            r#type: r#type.into(),
            unit: unit.into(),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.r#type, self.unit)
    }
}
