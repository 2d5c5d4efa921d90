// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::ProfileMerger;
use crate::collections::FxHashSet;
use crate::{MergeError, Profile};

/// The header fields of the merged profile, accumulated over every source.
pub(crate) struct MergedHeader {
    profile: Profile,
    seen_comments: FxHashSet<String>,
}

impl MergedHeader {
    /// Takes the sample types, period type and frame filters of `first`. The
    /// accumulated fields start out unset, so `first` still has to be passed
    /// to [MergedHeader::accumulate].
    pub fn new(first: &Profile) -> Self {
        let mut seen_comments = FxHashSet::default();
        seen_comments.reserve(first.comments.len());
        Self {
            profile: first.header(),
            seen_comments,
        }
    }

    pub fn accumulate(&mut self, src: &Profile) {
        let merged = &mut self.profile;
        // A zero time means unset, it doesn't take part in the minimum.
        if merged.time_nanos == 0 || src.time_nanos < merged.time_nanos {
            merged.time_nanos = src.time_nanos;
        }
        merged.duration_nanos = merged.duration_nanos.wrapping_add(src.duration_nanos);
        if merged.period == 0 || merged.period < src.period {
            merged.period = src.period;
        }
        for comment in &src.comments {
            if !self.seen_comments.contains(comment) {
                self.seen_comments.insert(comment.clone());
                merged.comments.push(comment.clone());
            }
        }
        // The first non-empty default wins, conflicting ones are ignored.
        if merged.default_sample_type.is_empty() {
            merged.default_sample_type.clone_from(&src.default_sample_type);
        }
    }

    pub fn into_profile(self) -> Profile {
        self.profile
    }
}

impl ProfileMerger {
    /// Checks that all profiles can be merged, either against the existing
    /// merged profile or, when there is none yet, against the first source,
    /// which then initializes it. Nothing is modified unless every source is
    /// compatible.
    pub(crate) fn combine_headers(&mut self, sources: &[Profile]) -> Result<(), MergeError> {
        match &self.header {
            Some(merged) => {
                for src in sources {
                    merged.profile.check_compatible(src)?;
                }
            }
            None => {
                let (first, rest) = sources
                    .split_first()
                    .ok_or(MergeError::NoProfilesProvided)?;
                for src in rest {
                    first.check_compatible(src)?;
                }
                self.header = Some(MergedHeader::new(first));
            }
        }

        if let Some(merged) = self.header.as_mut() {
            for src in sources {
                merged.accumulate(src);
            }
        }
        Ok(())
    }
}

impl Profile {
    /// Two profiles are compatible when they have the same period type and
    /// the same sample types, in the same order.
    pub fn check_compatible(&self, other: &Profile) -> Result<(), MergeError> {
        if self.period_type != other.period_type {
            return Err(MergeError::IncompatiblePeriodType {
                ours: self.period_type.clone(),
                theirs: other.period_type.clone(),
            });
        }
        if self.sample_types != other.sample_types {
            return Err(MergeError::IncompatibleSampleTypes {
                ours: self.sample_types.clone(),
                theirs: other.sample_types.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValueType;

    fn profile(time_nanos: i64, duration_nanos: i64, period: i64) -> Profile {
        Profile {
            sample_types: vec![ValueType::new("cpu", "nanoseconds")],
            period_type: Some(ValueType::new("cpu", "nanoseconds")),
            time_nanos,
            duration_nanos,
            period,
            ..Default::default()
        }
    }

    fn combined(sources: &[Profile]) -> Profile {
        let mut merger = ProfileMerger::new();
        merger.combine_headers(sources).unwrap();
        merger.header.take().unwrap().into_profile()
    }

    #[test]
    fn compatibility() {
        let a = profile(0, 0, 0);
        a.check_compatible(&a.clone()).unwrap();

        let mut b = a.clone();
        b.period_type = Some(ValueType::new("cpu", "milliseconds"));
        assert_eq!(
            Err(MergeError::IncompatiblePeriodType {
                ours: a.period_type.clone(),
                theirs: b.period_type.clone(),
            }),
            a.check_compatible(&b)
        );

        let mut c = a.clone();
        c.sample_types.push(ValueType::new("samples", "count"));
        assert!(matches!(
            a.check_compatible(&c),
            Err(MergeError::IncompatibleSampleTypes { .. })
        ));

        let mut d = a.clone();
        d.sample_types[0].unit = "microseconds".into();
        assert!(matches!(
            a.check_compatible(&d),
            Err(MergeError::IncompatibleSampleTypes { .. })
        ));
    }

    #[test]
    fn accumulates_times_and_period() {
        let merged = combined(&[
            profile(0, 10, 100),
            profile(2_000, 20, 300),
            profile(1_000, 30, 200),
        ]);
        // The unset time of the first profile is not a minimum.
        assert_eq!(1_000, merged.time_nanos);
        assert_eq!(60, merged.duration_nanos);
        assert_eq!(300, merged.period);
    }

    #[test]
    fn comments_and_default_sample_type() {
        let mut a = profile(0, 0, 0);
        a.comments = vec!["b".into(), "a".into(), "b".into()];
        let mut b = profile(0, 0, 0);
        b.comments = vec!["c".into(), "a".into()];
        b.default_sample_type = "cpu".into();
        let mut c = profile(0, 0, 0);
        c.default_sample_type = "wall".into();

        let merged = combined(&[a, b, c]);
        assert_eq!(vec!["b", "a", "c"], merged.comments);
        assert_eq!("cpu", merged.default_sample_type);
    }

    #[test]
    fn header_is_taken_from_first() {
        let mut a = profile(0, 0, 0);
        a.drop_frames = "runtime\\..*".into();
        a.keep_frames = "main".into();
        let mut b = profile(0, 0, 0);
        b.drop_frames = "other".into();

        let merged = combined(&[a.clone(), b]);
        assert_eq!(a.drop_frames, merged.drop_frames);
        assert_eq!(a.keep_frames, merged.keep_frames);
        assert_eq!(a.sample_types, merged.sample_types);
        assert_eq!(a.period_type, merged.period_type);
    }

    #[test]
    fn incompatible_leaves_state_untouched() {
        let mut merger = ProfileMerger::new();
        assert_eq!(
            Err(MergeError::NoProfilesProvided),
            merger.combine_headers(&[])
        );

        merger.combine_headers(&[profile(5, 1, 1)]).unwrap();

        let mut bad = profile(1, 1, 1);
        bad.sample_types.clear();
        assert!(merger.combine_headers(&[profile(3, 1, 1), bad]).is_err());

        let merged = merger.header.take().unwrap().into_profile();
        assert_eq!(5, merged.time_nanos);
        assert_eq!(1, merged.duration_nanos);
    }
}
