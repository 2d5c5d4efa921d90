// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

mod header;
mod keys;
mod mapper;
mod source;

use self::header::MergedHeader;
use self::keys::{FunctionKey, LocationKey, MappingKey, SampleKey};
use self::mapper::MapInfo;
use self::source::SourceIndex;
use crate::collections::{FxHashMap, FxIndexMap};
use crate::{
    Function, FunctionId, Location, LocationId, Mapping, MappingId, MergeError, MergerConfig,
    Profile, Sample,
};
use tracing::{debug, trace};

/// Merges all the profiles into a single profile. The result is independent
/// of the inputs and only holds the samples, locations, functions and mappings
/// reachable from non-zero samples.
///
/// The profiles must have identical period and sample types. The period of
/// the result is the largest one, and the time is the earliest non-zero one.
pub fn merge(profiles: &[Profile]) -> Result<Profile, MergeError> {
    if profiles.is_empty() {
        return Err(MergeError::NoProfilesProvided);
    }
    let mut merger = ProfileMerger::new();
    merger.merge(profiles)?;
    Ok(merger.take_result())
}

impl Profile {
    /// Garbage-collects the profile: the result only holds the entities which
    /// are reachable from non-zero samples, with dense ids. This is useful
    /// after samples or locations have been removed.
    pub fn compact(&self) -> Profile {
        let mut merger = ProfileMerger::new();
        merger.merge_unchecked(self);
        merger.take_result()
    }
}

/// Merges compatible profiles into one resulting profile, over one or more
/// calls to [ProfileMerger::merge].
///
/// The lookup tables keep their capacity when the result is taken, so reusing
/// a merger for the next unrelated batch of profiles avoids growing them from
/// scratch again. A merger is not meant to be shared between threads; use one
/// merger per concurrent merge.
#[derive(Default)]
pub struct ProfileMerger {
    config: MergerConfig,
    header: Option<MergedHeader>,

    // Memoization tables within a source profile, keyed by its own ids. Ids
    // are only unique within one profile, so these are cleared between them.
    locations_by_id: FxHashMap<LocationId, LocationId>,
    functions_by_id: FxHashMap<FunctionId, FunctionId>,
    mappings_by_id: FxHashMap<MappingId, MapInfo>,

    // Entities of the merged profile, by structural key. The index of an
    // entry is its id - 1.
    samples: FxIndexMap<SampleKey, Sample>,
    locations: FxIndexMap<LocationKey, Location>,
    functions: FxIndexMap<FunctionKey, Function>,
    mappings: FxIndexMap<MappingKey, Mapping>,
}

impl ProfileMerger {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MergerConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Merges the sources, using the prior merged state as the reference if
    /// there is one, or else the first source. Fails without merging anything
    /// if any of the sources is incompatible with the reference.
    pub fn merge(&mut self, sources: &[Profile]) -> Result<(), MergeError> {
        self.combine_headers(sources)?;
        debug!(
            sources = sources.len(),
            samples = self.samples.len(),
            "Merging profiles"
        );
        for src in sources {
            self.merge_one(src);
        }
        Ok(())
    }

    /// Returns the merged profile, clearing the internal state so that the
    /// merger can be reused. If nothing was merged, the profile is empty.
    pub fn take_result(&mut self) -> Profile {
        // Values of the same sample from different profiles can cancel out,
        // re-merge the result to get rid of them and whatever only they used.
        if self.samples.values().any(Sample::is_zero) {
            debug!(
                samples = self.samples.len(),
                "Merged profile has zero samples, compacting it"
            );
            self.compact();
        }
        let profile = self.build_profile().unwrap_or_default();
        self.clear();
        profile
    }

    /// Merges a single profile without checking it against any other, which
    /// can't fail since a profile is always compatible with itself.
    fn merge_unchecked(&mut self, profile: &Profile) {
        let mut header = MergedHeader::new(profile);
        header.accumulate(profile);
        self.header = Some(header);
        self.merge_one(profile);
    }

    fn merge_one(&mut self, src: &Profile) {
        self.reserve(src);

        self.locations_by_id.clear();
        self.functions_by_id.clear();
        self.mappings_by_id.clear();

        let index = SourceIndex::new(src);
        if self.mappings.is_empty() {
            // The first mapping represents the main binary. Take the first
            // one we see, otherwise mappings get added in the order the
            // samples happen to reference them.
            if let Some(main) = src.mappings.first() {
                self.map_mapping(Some(main));
            }
        }

        let mut dead = 0usize;
        for sample in &src.samples {
            if sample.is_zero() {
                dead += 1;
            } else {
                self.map_sample(sample, &index);
            }
        }

        trace!(
            samples = src.samples.len(),
            dead,
            merged_samples = self.samples.len(),
            merged_locations = self.locations.len(),
            merged_functions = self.functions.len(),
            merged_mappings = self.mappings.len(),
            "Merged source profile"
        );
    }

    /// Sizes the tables after the first source profile. Once allocated, the
    /// capacity is kept for the lifetime of the merger.
    fn reserve(&mut self, src: &Profile) {
        let config = &self.config;
        if self.samples.capacity() == 0 {
            self.samples.reserve(config.capacity_for(src.samples.len()));
        }
        if self.locations.capacity() == 0 {
            self.locations.reserve(config.capacity_for(src.locations.len()));
        }
        if self.functions.capacity() == 0 {
            self.functions.reserve(config.capacity_for(src.functions.len()));
        }
        if self.mappings.capacity() == 0 {
            self.mappings.reserve(config.capacity_for(src.mappings.len()));
        }
        if self.locations_by_id.capacity() == 0 {
            self.locations_by_id
                .reserve(config.capacity_for(src.locations.len()));
        }
        if self.functions_by_id.capacity() == 0 {
            self.functions_by_id
                .reserve(config.capacity_for(src.functions.len()));
        }
        if self.mappings_by_id.capacity() == 0 {
            self.mappings_by_id
                .reserve(config.capacity_for(src.mappings.len()));
        }
    }

    /// Re-merges the merged profile with itself.
    fn compact(&mut self) {
        let Some(profile) = self.build_profile() else {
            return;
        };
        self.clear();
        self.merge_unchecked(&profile);
    }

    /// Moves the merged entities out into a profile. The tables are left
    /// empty but keep their capacity.
    fn build_profile(&mut self) -> Option<Profile> {
        let mut profile = self.header.take()?.into_profile();
        profile.samples = self.samples.drain(..).map(|(_, sample)| sample).collect();
        profile.mappings = self.mappings.drain(..).map(|(_, mapping)| mapping).collect();
        profile.locations = self
            .locations
            .drain(..)
            .map(|(_, location)| location)
            .collect();
        profile.functions = self
            .functions
            .drain(..)
            .map(|(_, function)| function)
            .collect();
        Some(profile)
    }

    fn clear(&mut self) {
        self.header = None;
        self.locations_by_id.clear();
        self.functions_by_id.clear();
        self.mappings_by_id.clear();
        self.samples.clear();
        self.locations.clear();
        self.functions.clear();
        self.mappings.clear();
    }
}
