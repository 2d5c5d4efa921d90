// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::*;

/// A single stack frame. When functions were inlined, one location carries
/// several [Line]s.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    #[serde(default)]
    pub mapping_id: Option<MappingId>,
    #[serde(default)]
    pub address: u64,
    #[serde(default)]
    pub lines: Vec<Line>,
    /// Marks frames that were synthesized or folded by the profiler.
    #[serde(default)]
    pub is_folded: bool,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Line {
    /// None when the symbol could not be resolved.
    #[serde(default)]
    pub function_id: Option<FunctionId>,
    #[serde(default)]
    pub line: i64,
}

impl Item for Location {
    type Id = LocationId;

    fn id(&self) -> LocationId {
        self.id
    }
}
