// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::collections::FxHashMap;
use crate::{Function, FunctionId, Id, Item, Location, LocationId, Mapping, MappingId, Profile};
use tracing::debug;

/// Resolves the ids used inside one source profile to its entities.
pub(crate) struct SourceIndex<'a> {
    mappings: Arena<'a, Mapping>,
    functions: Arena<'a, Function>,
    locations: Arena<'a, Location>,
}

impl<'a> SourceIndex<'a> {
    pub fn new(profile: &'a Profile) -> Self {
        Self {
            mappings: Arena::new(&profile.mappings),
            functions: Arena::new(&profile.functions),
            locations: Arena::new(&profile.locations),
        }
    }

    pub fn mapping(&self, id: MappingId) -> Option<&'a Mapping> {
        let mapping = self.mappings.get(id);
        if mapping.is_none() {
            debug!(mapping_id = %id, "Location refers to an unknown mapping, treating it as absent");
        }
        mapping
    }

    pub fn function(&self, id: FunctionId) -> Option<&'a Function> {
        let function = self.functions.get(id);
        if function.is_none() {
            debug!(function_id = %id, "Line refers to an unknown function, treating it as absent");
        }
        function
    }

    pub fn location(&self, id: LocationId) -> Option<&'a Location> {
        let location = self.locations.get(id);
        if location.is_none() {
            debug!(location_id = %id, "Sample refers to an unknown location, dropping the frame");
        }
        location
    }
}

/// Dense arenas are indexed directly. Sparse ones get an id to offset table,
/// built once per source profile.
struct Arena<'a, T: Item> {
    items: &'a [T],
    offsets: Option<FxHashMap<T::Id, usize>>,
}

impl<'a, T: Item> Arena<'a, T> {
    fn new(items: &'a [T]) -> Self {
        let dense = items
            .iter()
            .enumerate()
            .all(|(offset, item)| item.id().to_offset() == offset);
        let offsets = (!dense).then(|| {
            items
                .iter()
                .enumerate()
                .map(|(offset, item)| (item.id(), offset))
                .collect()
        });
        Self { items, offsets }
    }

    fn get(&self, id: T::Id) -> Option<&'a T> {
        match &self.offsets {
            None => self.items.get(id.to_offset()),
            Some(offsets) => offsets
                .get(&id)
                .and_then(|offset| self.items.get(*offset)),
        }
    }
}
