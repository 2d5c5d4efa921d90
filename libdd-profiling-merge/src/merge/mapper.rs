// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::keys::{FunctionKey, LocationKey, MappingKey, SampleKey};
use super::source::SourceIndex;
use super::ProfileMerger;
use crate::{Function, FunctionId, Id, Line, Location, LocationId, Mapping, MappingId, Sample};
use indexmap::map::Entry;

/// The canonical mapping a source mapping was merged into, and how far the
/// addresses of the source need to be moved to land in the canonical one.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct MapInfo {
    pub id: Option<MappingId>,
    pub offset: i64,
}

impl ProfileMerger {
    pub(super) fn map_sample(&mut self, src: &Sample, index: &SourceIndex<'_>) {
        let locations = src
            .locations
            .iter()
            .filter_map(|id| index.location(*id))
            .map(|location| self.map_location(location, index))
            .collect();
        let sample = Sample {
            locations,
            values: src.values.clone(),
            labels: src.labels.clone(),
            num_labels: src.num_labels.clone(),
        };

        // Keyed on the remapped locations, so samples from different profiles
        // which went through different ids still meet.
        match self.samples.entry(SampleKey::new(&sample)) {
            Entry::Occupied(mut o) => {
                for (acc, value) in o.get_mut().values.iter_mut().zip(&src.values) {
                    *acc = acc.wrapping_add(*value);
                }
            }
            Entry::Vacant(v) => {
                v.insert(sample);
            }
        }
    }

    pub(super) fn map_location(&mut self, src: &Location, index: &SourceIndex<'_>) -> LocationId {
        if let Some(id) = self.locations_by_id.get(&src.id) {
            return *id;
        }

        let mapping = self.map_mapping(src.mapping_id.and_then(|id| index.mapping(id)));
        let lines = src
            .lines
            .iter()
            .map(|line| self.map_line(line, index))
            .collect();
        let location = Location {
            id: LocationId::from_offset(self.locations.len()),
            mapping_id: mapping.id,
            address: src.address.wrapping_add_signed(mapping.offset),
            lines,
            is_folded: src.is_folded,
        };

        // Must be keyed on the canonical mapping, since the address is made
        // relative to where that one was loaded.
        let canonical = mapping
            .id
            .and_then(|id| self.mappings.get_index(id.to_offset()))
            .map(|(_, mapping)| mapping);
        let key = LocationKey::new(&location, canonical);
        let id = match self.locations.entry(key) {
            Entry::Occupied(o) => o.get().id,
            Entry::Vacant(v) => v.insert(location).id,
        };
        self.locations_by_id.insert(src.id, id);
        id
    }

    pub(super) fn map_mapping(&mut self, src: Option<&Mapping>) -> MapInfo {
        let Some(src) = src else {
            return MapInfo::default();
        };
        if let Some(info) = self.mappings_by_id.get(&src.id) {
            return *info;
        }

        let info = match self.mappings.entry(MappingKey::new(src)) {
            Entry::Occupied(o) => {
                let mapping = o.get();
                MapInfo {
                    id: Some(mapping.id),
                    offset: mapping.memory_start.wrapping_sub(src.memory_start) as i64,
                }
            }
            Entry::Vacant(v) => {
                let id = MappingId::from_offset(v.index());
                v.insert(Mapping { id, ..src.clone() });
                MapInfo {
                    id: Some(id),
                    offset: 0,
                }
            }
        };
        self.mappings_by_id.insert(src.id, info);
        info
    }

    fn map_line(&mut self, src: &Line, index: &SourceIndex<'_>) -> Line {
        let function = src.function_id.and_then(|id| index.function(id));
        Line {
            function_id: self.map_function(function),
            line: src.line,
        }
    }

    fn map_function(&mut self, src: Option<&Function>) -> Option<FunctionId> {
        let src = src?;
        if let Some(id) = self.functions_by_id.get(&src.id) {
            return Some(*id);
        }

        let id = match self.functions.entry(FunctionKey::new(src)) {
            Entry::Occupied(o) => o.get().id,
            Entry::Vacant(v) => {
                let id = FunctionId::from_offset(v.index());
                v.insert(Function { id, ..src.clone() }).id
            }
        };
        self.functions_by_id.insert(src.id, id);
        Some(id)
    }
}
