use std::fmt::{self, Display};
use std::ops::RangeInclusive;

use crate::{Capacity, UnitId};

/// One parsed segment of a capacity override list: a capacity assigned to an inclusive range of
/// units. A single-unit segment is a range whose first and last unit are the same.
///
/// The range is guaranteed to be non-empty (`first_unit <= last_unit`).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CapacityToken {
    first_unit: UnitId,
    last_unit: UnitId,
    capacity: Capacity,
}

impl CapacityToken {
    /// Creates a token assigning `capacity` to units `first_unit..=last_unit`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`][crate::Error::InvalidRange] if `first_unit > last_unit`.
    pub fn new(first_unit: UnitId, last_unit: UnitId, capacity: Capacity) -> crate::Result<Self> {
        if first_unit > last_unit {
            return Err(crate::Error::InvalidRange {
                first_unit,
                last_unit,
            });
        }

        Ok(Self {
            first_unit,
            last_unit,
            capacity,
        })
    }

    /// Creates a token assigning `capacity` to a single unit.
    #[must_use]
    pub fn single(unit: UnitId, capacity: Capacity) -> Self {
        Self {
            first_unit: unit,
            last_unit: unit,
            capacity,
        }
    }

    /// The first unit the capacity is assigned to.
    #[must_use]
    pub fn first_unit(&self) -> UnitId {
        self.first_unit
    }

    /// The last unit the capacity is assigned to (inclusive).
    #[must_use]
    pub fn last_unit(&self) -> UnitId {
        self.last_unit
    }

    /// The capacity assigned to every unit in the range.
    #[must_use]
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// The units the capacity is assigned to, in ascending order.
    #[must_use]
    pub fn units(&self) -> RangeInclusive<UnitId> {
        self.first_unit..=self.last_unit
    }
}

/// Emits the canonical form: decimal numbers, `unit:capacity` for single units and
/// `first-last:capacity` for ranges.
impl Display for CapacityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first_unit == self.last_unit {
            write!(f, "{}:{}", self.first_unit, self.capacity)
        } else {
            write!(
                f,
                "{}-{}:{}",
                self.first_unit, self.last_unit, self.capacity
            )
        }
    }
}
