// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Builders for the profiles used by the integration tests.

#![allow(dead_code)]

use libdd_profiling_merge::*;

pub struct ProfileBuilder {
    profile: Profile,
}

impl ProfileBuilder {
    pub fn new(sample_types: &[(&str, &str)]) -> Self {
        Self {
            profile: Profile {
                sample_types: sample_types
                    .iter()
                    .map(|(r#type, unit)| ValueType::new(*r#type, *unit))
                    .collect(),
                ..Default::default()
            },
        }
    }

    pub fn cpu() -> Self {
        let mut builder = Self::new(&[("samples", "count"), ("cpu", "nanoseconds")]);
        builder.profile.period_type = Some(ValueType::new("cpu", "nanoseconds"));
        builder.profile.period = 10_000_000;
        builder
    }

    pub fn mapping(&mut self, start: u64, limit: u64, build_id: &str, filename: &str) -> MappingId {
        let id = MappingId::from_offset(self.profile.mappings.len());
        let mut mapping = Mapping::new(id);
        mapping.memory_start = start;
        mapping.memory_limit = limit;
        mapping.build_id = build_id.into();
        mapping.filename = filename.into();
        mapping.has_functions = true;
        self.profile.mappings.push(mapping);
        id
    }

    pub fn function(&mut self, name: &str, filename: &str) -> FunctionId {
        let id = FunctionId::from_offset(self.profile.functions.len());
        self.profile.functions.push(Function {
            id,
            name: name.into(),
            system_name: name.into(),
            filename: filename.into(),
            start_line: 1,
        });
        id
    }

    pub fn location(
        &mut self,
        mapping_id: Option<MappingId>,
        address: u64,
        lines: &[(FunctionId, i64)],
    ) -> LocationId {
        let id = LocationId::from_offset(self.profile.locations.len());
        self.profile.locations.push(Location {
            id,
            mapping_id,
            address,
            lines: lines
                .iter()
                .map(|(function_id, line)| Line {
                    function_id: Some(*function_id),
                    line: *line,
                })
                .collect(),
            is_folded: false,
        });
        id
    }

    /// Adds a function and a location with a single line for it.
    pub fn frame(&mut self, name: &str, line: i64) -> LocationId {
        let function = self.function(name, "main.rs");
        self.location(None, 0, &[(function, line)])
    }

    pub fn sample(&mut self, locations: &[LocationId], values: &[i64]) -> &mut Sample {
        self.profile.samples.push(Sample {
            locations: locations.to_vec(),
            values: values.to_vec(),
            ..Default::default()
        });
        // Just pushed, so there's a last sample.
        self.profile.samples.last_mut().unwrap()
    }

    pub fn header(&mut self) -> &mut Profile {
        &mut self.profile
    }

    pub fn build(self) -> Profile {
        self.profile
    }
}

/// A profile with a single sample of the given values, whose stack is the
/// frame `main:10`.
pub fn main_profile(values: &[i64]) -> Profile {
    let sample_types: Vec<_> = (0..values.len()).map(|_| ("samples", "count")).collect();
    let mut builder = ProfileBuilder::new(&sample_types);
    let main = builder.frame("main", 10);
    builder.sample(&[main], values);
    builder.build()
}

pub fn function_names(profile: &Profile) -> Vec<&str> {
    profile.functions.iter().map(|f| f.name.as_str()).collect()
}

/// Asserts ids are 1, 2, 3... for every entity kind.
#[track_caller]
pub fn assert_dense_ids(profile: &Profile) {
    for (offset, mapping) in profile.mappings.iter().enumerate() {
        assert_eq!(offset as u64 + 1, mapping.id.to_raw_id());
    }
    for (offset, location) in profile.locations.iter().enumerate() {
        assert_eq!(offset as u64 + 1, location.id.to_raw_id());
    }
    for (offset, function) in profile.functions.iter().enumerate() {
        assert_eq!(offset as u64 + 1, function.id.to_raw_id());
    }
}
