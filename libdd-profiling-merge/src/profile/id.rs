// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::num::NonZeroU64;

pub trait Id: Copy + Eq + Hash + fmt::Debug {
    /// Convert from a usize offset into an Id. The offset 0 maps to the id 1,
    /// since pprof reserves the id 0 for "no entity".
    fn from_offset(offset: usize) -> Self;

    /// The offset this id would have in a dense, 1-based collection.
    fn to_offset(self) -> usize;

    fn to_raw_id(self) -> u64;
}

/// An entity which lives in one of the arenas of a [`super::Profile`] and
/// knows its own id.
pub trait Item {
    /// The Id associated with this Item, e.g. Function -> FunctionId.
    type Id: Id;

    fn id(&self) -> Self::Id;
}

/// Creates a non-zero id from the offset. It's the offset + 1, saturating
/// rather than wrapping back to zero.
#[inline]
pub(crate) fn non_zero_pprof_id(offset: usize) -> NonZeroU64 {
    NonZeroU64::MIN.saturating_add(offset as u64)
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct MappingId(NonZeroU64);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct FunctionId(NonZeroU64);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct LocationId(NonZeroU64);

macro_rules! impl_id {
    ($($id:ident),+) => {
        $(
            impl $id {
                /// Wraps a raw pprof id, where 0 means "absent".
                #[inline]
                pub const fn new(raw: u64) -> Option<Self> {
                    match NonZeroU64::new(raw) {
                        Some(id) => Some(Self(id)),
                        None => None,
                    }
                }
            }

            impl Id for $id {
                #[inline]
                fn from_offset(offset: usize) -> Self {
                    Self(non_zero_pprof_id(offset))
                }

                #[inline]
                fn to_offset(self) -> usize {
                    (self.0.get() - 1) as usize
                }

                #[inline]
                fn to_raw_id(self) -> u64 {
                    self.0.get()
                }
            }

            impl fmt::Display for $id {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    self.0.fmt(f)
                }
            }
        )+
    };
}

impl_id!(MappingId, FunctionId, LocationId);
