use derive_more::Display;
use thiserror::Error;

use crate::UnitId;

/// Errors that can occur when processing capacity override lists.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A segment did not contain the `:` separating the unit part from the capacity.
    #[error("malformed capacity segment '{segment}': expected 'unit:capacity' or 'first-last:capacity'")]
    MalformedSpec {
        /// The segment that was missing the separator.
        segment: String,
    },

    /// A unit identifier or capacity value could not be parsed as an unsigned integer literal.
    #[error("invalid {role} '{invalid_value}': not an unsigned integer literal in range")]
    InvalidNumber {
        /// The text that failed to parse.
        invalid_value: String,

        /// Which part of the segment the text came from.
        role: NumberRole,
    },

    /// A unit range had its first unit after its last unit.
    #[error("invalid unit range {first_unit}-{last_unit}: range start must be <= end")]
    InvalidRange {
        /// The first unit of the range, as written.
        first_unit: UnitId,

        /// The last unit of the range, as written.
        last_unit: UnitId,
    },
}

/// Identifies which part of a segment a number was parsed from, for error reporting.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum NumberRole {
    /// The unit of a single-unit segment (`3` in `3:512`).
    #[display("unit")]
    Unit,

    /// The first unit of a range (`0` in `0-3:512`).
    #[display("range start")]
    RangeStart,

    /// The last unit of a range (`3` in `0-3:512`).
    #[display("range end")]
    RangeEnd,

    /// The capacity value (`512` in `0-3:512`).
    #[display("capacity")]
    Capacity,
}

/// A whole capacity override list failed to parse because one of its segments was invalid.
#[derive(Debug, Error)]
#[error("capacity segment {segment} is invalid: {source}")]
pub struct SpecError {
    segment: usize,

    #[source]
    source: Error,
}

impl SpecError {
    pub(crate) fn new(segment: usize, source: Error) -> Self {
        Self { segment, source }
    }

    /// The zero-based position of the invalid segment among the comma-separated segments of the
    /// list, counting empty segments.
    #[must_use]
    pub fn segment(&self) -> usize {
        self.segment
    }

    /// The reason the segment was rejected.
    #[must_use]
    pub fn error(&self) -> &Error {
        &self.source
    }

    /// Consumes the error, returning the reason the segment was rejected.
    #[must_use]
    pub fn into_error(self) -> Error {
        self.source
    }
}

/// A specialized `Result` type for capacity list operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug);
    assert_impl_all!(SpecError: Send, Sync, Debug);

    #[test]
    fn invalid_number_names_role() {
        let error = Error::InvalidNumber {
            invalid_value: "abc".to_string(),
            role: NumberRole::RangeEnd,
        };

        let message = error.to_string();
        assert!(message.contains("range end"), "{message}");
        assert!(message.contains("'abc'"), "{message}");
    }

    #[test]
    fn spec_error_exposes_segment_and_source() {
        let error = SpecError::new(
            2,
            Error::InvalidRange {
                first_unit: 3,
                last_unit: 1,
            },
        );

        assert_eq!(error.segment(), 2);
        assert!(matches!(error.error(), Error::InvalidRange { .. }));
        assert!(error.to_string().starts_with("capacity segment 2 is invalid"));
        assert!(matches!(
            error.into_error(),
            Error::InvalidRange {
                first_unit: 3,
                last_unit: 1
            }
        ));
    }
}
