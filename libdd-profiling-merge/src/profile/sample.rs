// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::*;
use std::collections::HashMap;

/// One recorded observation: a call stack plus one value per sample type.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sample {
    /// The call stack, leaf first.
    pub locations: Vec<LocationId>,
    pub values: Vec<i64>,
    pub labels: HashMap<String, Vec<String>>,
    pub num_labels: HashMap<String, NumLabel>,
}

/// The numeric values of a label, paired with their units. `units` may be
/// shorter than `values`, including empty.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct NumLabel {
    pub values: Vec<i64>,
    pub units: Vec<String>,
}

impl Sample {
    /// A sample whose values are all zero is dead, and is dropped by merging
    /// and compaction.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0)
    }
}
