// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::*;
use crate::collections::FxHashSet;

impl Profile {
    /// Checks that the profile is structurally sound: ids are unique per
    /// entity kind, every reference resolves within this profile, and every
    /// sample has one value per sample type.
    ///
    /// Merging never requires this. Dangling references are treated as absent
    /// while merging, so callers who would rather fail fast on malformed input
    /// should call this first.
    pub fn check_valid(&self) -> anyhow::Result<()> {
        let sample_len = self.sample_types.len();
        anyhow::ensure!(
            sample_len != 0 || self.samples.is_empty(),
            "missing sample type information"
        );

        let mappings = unique_ids(&self.mappings, "mapping")?;
        let functions = unique_ids(&self.functions, "function")?;
        let locations = unique_ids(&self.locations, "location")?;

        for location in &self.locations {
            if let Some(mapping_id) = location.mapping_id {
                anyhow::ensure!(
                    mappings.contains(&mapping_id),
                    "location {} refers to unknown mapping {mapping_id}",
                    location.id
                );
            }
            for line in &location.lines {
                if let Some(function_id) = line.function_id {
                    anyhow::ensure!(
                        functions.contains(&function_id),
                        "location {} has a line referring to unknown function {function_id}",
                        location.id
                    );
                }
            }
        }

        for (offset, sample) in self.samples.iter().enumerate() {
            anyhow::ensure!(
                sample.values.len() == sample_len,
                "mismatch: sample {offset} has {} values vs. {sample_len} types",
                sample.values.len()
            );
            for location_id in &sample.locations {
                anyhow::ensure!(
                    locations.contains(location_id),
                    "sample {offset} refers to unknown location {location_id}"
                );
            }
        }
        Ok(())
    }
}

fn unique_ids<T: Item>(items: &[T], kind: &str) -> anyhow::Result<FxHashSet<T::Id>> {
    let mut ids = FxHashSet::default();
    ids.reserve(items.len());
    for item in items {
        anyhow::ensure!(ids.insert(item.id()), "multiple {kind}s with the same id: {:?}", item.id());
    }
    Ok(ids)
}
