// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::*;

/// One binary or shared library image loaded into the profiled process.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Mapping {
    pub id: MappingId,
    #[serde(default)]
    pub memory_start: u64,
    #[serde(default)]
    pub memory_limit: u64,
    #[serde(default)]
    pub file_offset: u64,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub build_id: String,
    #[serde(default)]
    pub has_functions: bool,
    #[serde(default)]
    pub has_filenames: bool,
    #[serde(default)]
    pub has_line_numbers: bool,
    #[serde(default)]
    pub has_inline_frames: bool,
}

impl Mapping {
    /// Creates a mapping with the given id and every other field zeroed.
    pub fn new(id: MappingId) -> Self {
        Self {
            id,
            memory_start: 0,
            memory_limit: 0,
            file_offset: 0,
            filename: String::new(),
            build_id: String::new(),
            has_functions: false,
            has_filenames: false,
            has_line_numbers: false,
            has_inline_frames: false,
        }
    }
}

impl Item for Mapping {
    type Id = MappingId;

    fn id(&self) -> MappingId {
        self.id
    }
}
