// Copyright 2026-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::ValueType;
use std::fmt;

/// Errors returned when profiles cannot be merged or normalized. None of them
/// leave a partial result behind: the merged state is only touched after all
/// inputs have been checked.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum MergeError {
    #[error("no profiles to merge")]
    NoProfilesProvided,
    #[error("incompatible period types {} and {}", DisplayPeriod(.ours), DisplayPeriod(.theirs))]
    IncompatiblePeriodType {
        ours: Option<ValueType>,
        theirs: Option<ValueType>,
    },
    #[error("incompatible sample types {} and {}", DisplayList(.ours), DisplayList(.theirs))]
    IncompatibleSampleTypes {
        ours: Vec<ValueType>,
        theirs: Vec<ValueType>,
    },
    #[error("mismatched scale ratios, got {got}, want {want}")]
    MismatchedScaleRatios { got: usize, want: usize },
}

struct DisplayPeriod<'a>(&'a Option<ValueType>);

impl fmt::Display for DisplayPeriod<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value_type) => value_type.fmt(f),
            None => f.write_str("<none>"),
        }
    }
}

struct DisplayList<'a>(&'a [ValueType]);

impl fmt::Display for DisplayList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value_type) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            value_type.fmt(f)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = MergeError::IncompatiblePeriodType {
            ours: Some(ValueType::new("cpu", "nanoseconds")),
            theirs: None,
        };
        assert_eq!(
            "incompatible period types cpu/nanoseconds and <none>",
            err.to_string()
        );

        let err = MergeError::IncompatibleSampleTypes {
            ours: vec![
                ValueType::new("samples", "count"),
                ValueType::new("cpu", "nanoseconds"),
            ],
            theirs: vec![ValueType::new("samples", "count")],
        };
        assert_eq!(
            "incompatible sample types [samples/count cpu/nanoseconds] and [samples/count]",
            err.to_string()
        );
    }
}
