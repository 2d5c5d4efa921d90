// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergerConfig {
    /// On the first merge pass, the lookup tables reserve this many slots per
    /// entity of the source profile, so that later passes rarely resize them.
    /// Zero is treated as one.
    pub over_allocation: usize,
}

impl MergerConfig {
    pub const DEFAULT_OVER_ALLOCATION: usize = 4;

    #[inline]
    pub(crate) fn capacity_for(&self, len: usize) -> usize {
        self.over_allocation.max(1).saturating_mul(len)
    }
}

impl Default for MergerConfig {
    fn default() -> Self {
        Self {
            over_allocation: Self::DEFAULT_OVER_ALLOCATION,
        }
    }
}
