// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::{MergeError, Profile};
use tracing::debug;

impl Profile {
    /// Normalizes the profile by multiplying each value by the ratio of the
    /// base profile's sum of that sample type to this profile's sum of it.
    /// Uses [Profile::scale_n] to do the multiplication.
    pub fn normalize(&mut self, base: &Profile) -> Result<(), MergeError> {
        self.normalize_with(base, Profile::scale_n)
    }

    /// Same as [Profile::normalize], but the per sample type ratios are
    /// handed to `scale`, which is in charge of rescaling the values. A sample
    /// type which sums to zero in this profile gets a ratio of zero.
    pub fn normalize_with<F>(&mut self, base: &Profile, scale: F) -> Result<(), MergeError>
    where
        F: FnOnce(&mut Profile, &[f64]) -> Result<(), MergeError>,
    {
        self.check_compatible(base)?;

        let len = self.sample_types.len();
        let base_sums = sum_values(base, len);
        let sums = sum_values(self, len);
        let ratios: Vec<f64> = base_sums
            .iter()
            .zip(&sums)
            .map(|(base_sum, sum)| {
                if *sum == 0 {
                    0.0
                } else {
                    *base_sum as f64 / *sum as f64
                }
            })
            .collect();

        debug!(?ratios, "Normalizing profile");
        scale(self, &ratios)
    }

    /// Multiplies the values of each sample type by its ratio, rounding to
    /// the nearest integer. Samples which end up with only zero values are
    /// removed. A profile with all ratios equal to one is left untouched.
    ///
    /// Every value counts when deciding whether a sample is kept, including
    /// the ones whose ratio is one and were left as is. pprof's own `ScaleN`
    /// only looks at the rescaled values, so a sample whose rescaled values
    /// all round to zero is dropped there but kept here. Pass a custom
    /// closure to [Profile::normalize_with] to get that behavior.
    pub fn scale_n(&mut self, ratios: &[f64]) -> Result<(), MergeError> {
        if ratios.len() != self.sample_types.len() {
            return Err(MergeError::MismatchedScaleRatios {
                got: ratios.len(),
                want: self.sample_types.len(),
            });
        }
        if ratios.iter().all(|ratio| *ratio == 1.0) {
            return Ok(());
        }

        self.samples.retain_mut(|sample| {
            for (value, ratio) in sample.values.iter_mut().zip(ratios) {
                if *ratio != 1.0 {
                    *value = (*value as f64 * ratio).round() as i64;
                }
            }
            !sample.is_zero()
        });
        Ok(())
    }
}

fn sum_values(profile: &Profile, len: usize) -> Vec<i64> {
    let mut sums = vec![0i64; len];
    for sample in &profile.samples {
        for (sum, value) in sums.iter_mut().zip(&sample.values) {
            *sum = sum.wrapping_add(*value);
        }
    }
    sums
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Sample, ValueType};

    fn profile(values: &[[i64; 2]]) -> Profile {
        Profile {
            sample_types: vec![
                ValueType::new("samples", "count"),
                ValueType::new("cpu", "nanoseconds"),
            ],
            samples: values
                .iter()
                .map(|values| Sample {
                    values: values.to_vec(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn ratios() {
        let mut receiver = profile(&[[60, 0], [40, 0]]);
        let base = profile(&[[50, 7]]);

        let mut seen = vec![];
        receiver
            .normalize_with(&base, |_, ratios| {
                seen = ratios.to_vec();
                Ok(())
            })
            .unwrap();
        // The second type sums to zero in the receiver.
        assert_eq!(vec![0.5, 0.0], seen);
    }

    #[test]
    fn normalize_scales_values() {
        let mut receiver = profile(&[[60, 10], [40, 30]]);
        let base = profile(&[[25, 40], [25, 40]]);

        receiver.normalize(&base).unwrap();
        let values: Vec<_> = receiver.samples.iter().map(|s| s.values.clone()).collect();
        assert_eq!(vec![vec![30, 20], vec![20, 60]], values);
    }

    #[test]
    fn normalize_requires_compatible() {
        let mut receiver = profile(&[[1, 1]]);
        let mut base = profile(&[[1, 1]]);
        base.sample_types.pop();

        let err = receiver.normalize(&base).unwrap_err();
        assert!(matches!(err, MergeError::IncompatibleSampleTypes { .. }));
        assert_eq!(vec![1, 1], receiver.samples[0].values);
    }

    #[test]
    fn scale_n() {
        let mut p = profile(&[[3, 1], [1, 0], [0, 5]]);
        p.scale_n(&[0.5, 0.0]).unwrap();
        // 1.5 rounds away from zero, 0.5 as well, and the last sample is gone.
        let values: Vec<_> = p.samples.iter().map(|s| s.values.clone()).collect();
        assert_eq!(vec![vec![2, 0], vec![1, 0]], values);

        assert_eq!(
            Err(MergeError::MismatchedScaleRatios { got: 1, want: 2 }),
            p.scale_n(&[1.0])
        );

        let before = p.clone();
        p.scale_n(&[1.0, 1.0]).unwrap();
        assert_eq!(before, p);
    }

    #[test]
    fn scale_n_keeps_samples_with_unscaled_values() {
        let mut p = profile(&[[1, 4], [1, 0]]);
        p.scale_n(&[0.1, 1.0]).unwrap();
        // The first sample's scaled value rounds to zero, the unscaled one keeps it.
        let values: Vec<_> = p.samples.iter().map(|s| s.values.clone()).collect();
        assert_eq!(vec![vec![0, 4]], values);
    }
}
