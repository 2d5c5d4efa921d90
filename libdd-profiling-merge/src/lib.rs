// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

//! Merging and compaction of decoded pprof-shaped profiles.
//!
//! Profiles coming from different processes, time windows or machines are
//! combined into one profile where structurally identical samples, locations,
//! functions and mappings are represented exactly once. The same machinery
//! garbage-collects a single profile: only entities reachable from non-zero
//! samples survive a [`Profile::compact`].
//!
//! ```
//! use libdd_profiling_merge::{merge, Profile, ValueType};
//!
//! let profile = Profile {
//!     sample_types: vec![ValueType::new("samples", "count")],
//!     ..Default::default()
//! };
//! let merged = merge(&[profile.clone(), profile]).unwrap();
//! assert!(merged.samples.is_empty());
//! ```

mod collections;
mod config;
mod error;
mod merge;
mod normalize;
mod profile;

pub use config::*;
pub use error::*;
pub use merge::*;
pub use profile::*;
