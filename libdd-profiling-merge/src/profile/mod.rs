// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

mod function;
mod id;
mod location;
mod mapping;
mod sample;
mod validate;
mod value_type;

pub use function::*;
pub use id::*;
pub use location::*;
pub use mapping::*;
pub use sample::*;
pub use value_type::*;

use serde::{Deserialize, Serialize};

/// A decoded profile. Each entity kind is stored in its own arena, and
/// entities refer to each other by id rather than by pointer, so a
/// [Location] names its [Mapping] through a [MappingId] and each of its
/// [Line]s names its [Function] through a [FunctionId].
///
/// Profiles produced by this crate have dense ids: the entity with id `n`
/// lives at offset `n - 1` of its arena. Input profiles don't need to.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub sample_types: Vec<ValueType>,
    pub samples: Vec<Sample>,
    pub mappings: Vec<Mapping>,
    pub locations: Vec<Location>,
    pub functions: Vec<Function>,
    /// Regex of frames to drop, carried along from the first merged profile.
    pub drop_frames: String,
    pub keep_frames: String,
    pub time_nanos: i64,
    pub duration_nanos: i64,
    pub period_type: Option<ValueType>,
    pub period: i64,
    pub comments: Vec<String>,
    pub default_sample_type: String,
}

impl Profile {
    pub fn mapping(&self, id: MappingId) -> Option<&Mapping> {
        find_by_id(&self.mappings, id)
    }

    pub fn function(&self, id: FunctionId) -> Option<&Function> {
        find_by_id(&self.functions, id)
    }

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        find_by_id(&self.locations, id)
    }

    /// Returns the header of this profile, without any samples or the
    /// entities they refer to.
    pub(crate) fn header(&self) -> Profile {
        Profile {
            sample_types: self.sample_types.clone(),
            drop_frames: self.drop_frames.clone(),
            keep_frames: self.keep_frames.clone(),
            period_type: self.period_type.clone(),
            ..Default::default()
        }
    }
}

/// Looks at the offset a dense arena would use first, and falls back to a
/// linear scan for sparse ones.
fn find_by_id<T: Item>(items: &[T], id: T::Id) -> Option<&T> {
    match items.get(id.to_offset()) {
        Some(item) if item.id() == id => Some(item),
        _ => items.iter().find(|item| item.id() == id),
    }
}
