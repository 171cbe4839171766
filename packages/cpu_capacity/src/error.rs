use std::fmt::{self, Display};

use thiserror::Error;

use crate::{Capacity, MAX_CAPACITY, UnitId};

/// Errors that can occur when applying capacity overrides.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A segment of the capacity override list is not syntactically valid.
    #[error(transparent)]
    Spec(#[from] capacity_spec::Error),

    /// A segment referred to a unit that does not exist.
    #[error("unit {unit} does not exist: there are only {unit_count} units")]
    OutOfRange {
        /// The unit that was referred to.
        unit: UnitId,

        /// How many units exist.
        unit_count: usize,
    },

    /// A segment assigned a capacity larger than [`MAX_CAPACITY`].
    #[error("capacity {capacity} for unit {unit} exceeds the maximum of {max}", max = MAX_CAPACITY)]
    CapacityTooLarge {
        /// The unit the capacity was assigned to.
        unit: UnitId,

        /// The rejected capacity.
        capacity: Capacity,
    },

    /// The snapshot of original capacities could not be allocated.
    #[error("failed to allocate a snapshot of {unit_count} unit capacities")]
    OutOfMemory {
        /// How many units the snapshot needed to cover.
        unit_count: usize,
    },

    /// The session has been torn down and no longer accepts changes.
    #[error("the capacity session has been torn down and no longer accepts changes")]
    Closed,
}

/// A capacity override list was rejected.
///
/// Wraps the reason together with the position of the segment that caused it. Values written by
/// segments (and units) processed before the failing one remain in effect.
#[derive(Debug)]
pub struct ApplyError {
    segment: Option<usize>,
    error: Error,
}

impl ApplyError {
    pub(crate) fn in_segment(segment: usize, error: impl Into<Error>) -> Self {
        Self {
            segment: Some(segment),
            error: error.into(),
        }
    }

    /// The zero-based position of the failing segment among the comma-separated segments of the
    /// list (counting empty segments), or `None` if the failure was not caused by a segment.
    #[must_use]
    pub fn segment(&self) -> Option<usize> {
        self.segment
    }

    /// The reason the list was rejected.
    #[must_use]
    pub fn error(&self) -> &Error {
        &self.error
    }

    /// Consumes the error, returning the reason the list was rejected.
    #[must_use]
    pub fn into_error(self) -> Error {
        self.error
    }
}

impl From<Error> for ApplyError {
    fn from(error: Error) -> Self {
        Self {
            segment: None,
            error,
        }
    }
}

impl Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.segment {
            Some(segment) => write!(f, "capacity segment {segment} rejected: {}", self.error),
            None => write!(f, "capacity overrides rejected: {}", self.error),
        }
    }
}

impl std::error::Error for ApplyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// A specialized `Result` type for capacity operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::error::Error as _;
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug);
    assert_impl_all!(ApplyError: Send, Sync, Debug);

    #[test]
    fn capacity_too_large_mentions_maximum() {
        let error = Error::CapacityTooLarge {
            unit: 3,
            capacity: 2000,
        };

        assert_eq!(
            error.to_string(),
            "capacity 2000 for unit 3 exceeds the maximum of 1024"
        );
    }

    #[test]
    fn apply_error_with_segment() {
        let error = ApplyError::in_segment(1, Error::OutOfRange {
            unit: 9,
            unit_count: 4,
        });

        assert_eq!(error.segment(), Some(1));
        assert!(error.source().is_some());
        assert_eq!(
            error.to_string(),
            "capacity segment 1 rejected: unit 9 does not exist: there are only 4 units"
        );
        assert!(matches!(error.into_error(), Error::OutOfRange { unit: 9, .. }));
    }

    #[test]
    fn apply_error_without_segment() {
        let error = ApplyError::from(Error::OutOfMemory { unit_count: 8 });

        assert_eq!(error.segment(), None);
        assert!(matches!(error.error(), Error::OutOfMemory { unit_count: 8 }));
        assert!(error.to_string().starts_with("capacity overrides rejected"));
    }

    #[test]
    fn spec_errors_convert() {
        let error = Error::from(capacity_spec::Error::InvalidRange {
            first_unit: 3,
            last_unit: 1,
        });

        assert!(matches!(
            error,
            Error::Spec(capacity_spec::Error::InvalidRange { .. })
        ));
    }
}
