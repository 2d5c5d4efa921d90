// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Structural keys used to decide whether two entities coming from different
//! profiles are the same thing. None of them include the entity's own id, and
//! none depend on hash map iteration order.

use crate::{Function, FunctionId, Id, Location, Mapping, Sample};
use std::fmt::Write;

/// Mapping sizes are rounded up to the next 4 KiB boundary, so captures of the
/// same binary with slightly different reported sizes still match.
const MAP_SIZE_ROUNDING: u64 = 0x1000;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct MappingKey {
    size: u64,
    offset: u64,
    build_id_or_file: String,
}

impl MappingKey {
    /// The start address is left out so that the same binary loaded at
    /// different addresses (ASLR) yields the same key.
    pub fn new(mapping: &Mapping) -> Self {
        let size = mapping.memory_limit.wrapping_sub(mapping.memory_start);
        let size = size.wrapping_add(MAP_SIZE_ROUNDING - 1);
        let size = size - size % MAP_SIZE_ROUNDING;

        // A mapping with neither a build id nor a filename is a fake mapping.
        // They all share the empty key and get merged together.
        let build_id_or_file = if !mapping.build_id.is_empty() {
            mapping.build_id.clone()
        } else {
            mapping.filename.clone()
        };

        Self {
            size,
            offset: mapping.file_offset,
            build_id_or_file,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct FunctionKey {
    start_line: i64,
    name: String,
    system_name: String,
    filename: String,
}

impl FunctionKey {
    pub fn new(function: &Function) -> Self {
        Self {
            start_line: function.start_line,
            name: function.name.clone(),
            system_name: function.system_name.clone(),
            filename: function.filename.clone(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct LocationKey {
    addr: u64,
    mapping_id: u64,
    lines: Vec<(Option<FunctionId>, i64)>,
    is_folded: bool,
}

impl LocationKey {
    /// `mapping` is the mapping the location refers to, which must already be
    /// the canonical one of the merged profile.
    pub fn new(location: &Location, mapping: Option<&Mapping>) -> Self {
        let (addr, mapping_id) = match mapping {
            Some(mapping) => (
                location.address.wrapping_sub(mapping.memory_start),
                mapping.id.to_raw_id(),
            ),
            None => (location.address, 0),
        };

        // Kept as pairs rather than rendered, so a missing function can't be
        // confused with a function whose id spells out the line number.
        let lines = location
            .lines
            .iter()
            .map(|line| (line.function_id, line.line))
            .collect();

        Self {
            addr,
            mapping_id,
            lines,
            is_folded: location.is_folded,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct SampleKey {
    locations: String,
    labels: String,
    num_labels: String,
}

impl SampleKey {
    /// `sample` must already refer to the locations of the merged profile.
    pub fn new(sample: &Sample) -> Self {
        let mut locations = String::with_capacity(sample.locations.len() * 17);
        for (i, location_id) in sample.locations.iter().enumerate() {
            if i > 0 {
                locations.push('|');
            }
            let _ = write!(locations, "{:x}", location_id.to_raw_id());
        }

        let mut labels: Vec<String> = sample
            .labels
            .iter()
            .map(|(key, values)| format!("{key:?}{values:?}"))
            .collect();
        labels.sort_unstable();

        let mut num_labels: Vec<String> = sample
            .num_labels
            .iter()
            .map(|(key, num_label)| {
                let mut entry = format!("{key:?}[");
                for (i, value) in num_label.values.iter().enumerate() {
                    if i > 0 {
                        entry.push(' ');
                    }
                    write_signed_hex(&mut entry, *value);
                }
                entry.push_str("][");
                for (i, unit) in num_label.units.iter().enumerate() {
                    if i > 0 {
                        entry.push(' ');
                    }
                    for byte in unit.bytes() {
                        let _ = write!(entry, "{byte:02x}");
                    }
                }
                entry.push(']');
                entry
            })
            .collect();
        num_labels.sort_unstable();

        Self {
            locations,
            labels: labels.concat(),
            num_labels: num_labels.concat(),
        }
    }
}

/// Writes `-a` for -10 rather than the two's complement.
fn write_signed_hex(out: &mut String, value: i64) {
    if value < 0 {
        out.push('-');
    }
    let _ = write!(out, "{:x}", value.unsigned_abs());
}
