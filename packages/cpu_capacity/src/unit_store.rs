use std::num::NonZero;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use nonempty::NonEmpty;
use tracing::{debug, info};

use crate::{Capacity, CapacityReader, UnitId};

/// The largest capacity a unit can have. Assigned to the fastest processors in the system.
pub const MAX_CAPACITY: Capacity = 1024;

/// The live capacity table of a fixed set of units, plus an optional snapshot of the values that
/// were in place before the first change.
///
/// The number of units is fixed when the store is created. Units are identified by their
/// zero-based index.
///
/// # Example
///
/// ```
/// use cpu_capacity::{MAX_CAPACITY, UnitStore};
/// use nonempty::nonempty;
///
/// let mut store = UnitStore::from_capacities(nonempty![1024, 1024, 512, 512]).unwrap();
///
/// store.ensure_snapshot().unwrap();
/// store.write(2, MAX_CAPACITY).unwrap();
/// assert_eq!(store.read(2).unwrap(), 1024);
///
/// store.restore_snapshot();
/// assert_eq!(store.read(2).unwrap(), 512);
/// ```
#[derive(Debug)]
pub struct UnitStore {
    cells: Arc<[AtomicU64]>,

    // Present from the first `ensure_snapshot()` until the next `restore_snapshot()`.
    snapshot: Option<Box<[Capacity]>>,
}

impl UnitStore {
    /// Creates a store of `unit_count` units, each at [`MAX_CAPACITY`].
    #[must_use]
    pub fn new(unit_count: NonZero<usize>) -> Self {
        let cells = (0..unit_count.get())
            .map(|_| AtomicU64::new(MAX_CAPACITY))
            .collect();

        Self {
            cells,
            snapshot: None,
        }
    }

    /// Creates a store with one unit per item in `capacities`, in unit order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityTooLarge`][crate::Error::CapacityTooLarge] if any of the values
    /// exceeds [`MAX_CAPACITY`].
    pub fn from_capacities(capacities: NonEmpty<Capacity>) -> crate::Result<Self> {
        if let Some((index, &capacity)) = capacities
            .iter()
            .enumerate()
            .find(|(_, capacity)| **capacity > MAX_CAPACITY)
        {
            return Err(crate::Error::CapacityTooLarge {
                unit: UnitId::try_from(index).unwrap_or(UnitId::MAX),
                capacity,
            });
        }

        Ok(Self {
            cells: capacities.into_iter().map(AtomicU64::new).collect(),
            snapshot: None,
        })
    }

    /// The number of units in the store.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns a handle that reads the live values without going through the store.
    #[must_use]
    pub fn reader(&self) -> CapacityReader {
        CapacityReader::new(Arc::clone(&self.cells))
    }

    /// The current capacity of `unit`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`][crate::Error::OutOfRange] if there is no such unit.
    pub fn read(&self, unit: UnitId) -> crate::Result<Capacity> {
        Ok(self.cell(unit)?.load(Ordering::Acquire))
    }

    /// Sets the capacity of `unit`. The new value is immediately visible to all readers.
    ///
    /// # Errors
    ///
    /// * [`Error::OutOfRange`][crate::Error::OutOfRange] if there is no such unit.
    /// * [`Error::CapacityTooLarge`][crate::Error::CapacityTooLarge] if `capacity` exceeds
    ///   [`MAX_CAPACITY`].
    ///
    /// The unit is checked first, so a write that is wrong on both counts reports the unit.
    pub fn write(&self, unit: UnitId, capacity: Capacity) -> crate::Result<()> {
        let cell = self.cell(unit)?;

        if capacity > MAX_CAPACITY {
            return Err(crate::Error::CapacityTooLarge { unit, capacity });
        }

        cell.store(capacity, Ordering::Release);
        debug!(unit, capacity, "unit capacity set");

        Ok(())
    }

    /// Captures the current value of every unit, unless a snapshot already exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`][crate::Error::OutOfMemory] if the snapshot cannot be
    /// allocated. No snapshot is taken in that case.
    pub fn ensure_snapshot(&mut self) -> crate::Result<()> {
        if self.snapshot.is_some() {
            return Ok(());
        }

        let unit_count = self.unit_count();

        let mut snapshot = Vec::new();
        snapshot
            .try_reserve_exact(unit_count)
            .map_err(|_| crate::Error::OutOfMemory { unit_count })?;

        snapshot.extend(self.cells.iter().map(|cell| cell.load(Ordering::Acquire)));

        self.snapshot = Some(snapshot.into_boxed_slice());
        debug!(unit_count, "original unit capacities saved");

        Ok(())
    }

    /// Whether a snapshot of the original values is currently held.
    #[must_use]
    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Writes the snapshot back to the live table and discards it.
    ///
    /// Does nothing if there is no snapshot. Returns whether a snapshot was restored.
    pub fn restore_snapshot(&mut self) -> bool {
        let Some(snapshot) = self.snapshot.take() else {
            return false;
        };

        for (cell, &capacity) in self.cells.iter().zip(snapshot.iter()) {
            cell.store(capacity, Ordering::Release);
        }

        info!(
            unit_count = snapshot.len(),
            "original unit capacities restored"
        );

        true
    }

    fn cell(&self, unit: UnitId) -> crate::Result<&AtomicU64> {
        usize::try_from(unit)
            .ok()
            .and_then(|index| self.cells.get(index))
            .ok_or_else(|| crate::Error::OutOfRange {
                unit,
                unit_count: self.unit_count(),
            })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use new_zealand::nz;
    use nonempty::nonempty;
    use static_assertions::assert_impl_all;

    use super::*;
    use crate::Error;

    assert_impl_all!(UnitStore: Send, Sync);

    #[test]
    fn new_starts_at_max_capacity() {
        let store = UnitStore::new(nz!(3));

        assert_eq!(store.unit_count(), 3);
        assert_eq!(store.reader().to_vec(), vec![MAX_CAPACITY; 3]);
        assert!(!store.has_snapshot());
    }

    #[test]
    fn from_capacities_rejects_too_large() {
        let result = UnitStore::from_capacities(nonempty![1, 2, MAX_CAPACITY + 1]);

        assert!(matches!(
            result,
            Err(Error::CapacityTooLarge {
                unit: 2,
                capacity: 1025
            })
        ));
    }

    #[test]
    fn read_and_write() {
        let store = UnitStore::from_capacities(nonempty![100, 200]).unwrap();

        assert_eq!(store.read(1).unwrap(), 200);

        store.write(1, 0).unwrap();
        assert_eq!(store.read(1).unwrap(), 0);

        store.write(0, MAX_CAPACITY).unwrap();
        assert_eq!(store.read(0).unwrap(), MAX_CAPACITY);
    }

    #[test]
    fn out_of_range_unit() {
        let store = UnitStore::new(nz!(4));

        assert!(matches!(
            store.read(4),
            Err(Error::OutOfRange {
                unit: 4,
                unit_count: 4
            })
        ));
        assert!(matches!(
            store.write(UnitId::MAX, 1),
            Err(Error::OutOfRange { .. })
        ));
    }

    #[test]
    fn capacity_too_large_leaves_value_unchanged() {
        let store = UnitStore::from_capacities(nonempty![300]).unwrap();

        assert!(matches!(
            store.write(0, 2000),
            Err(Error::CapacityTooLarge {
                unit: 0,
                capacity: 2000
            })
        ));
        assert_eq!(store.read(0).unwrap(), 300);
    }

    #[test]
    fn unit_is_checked_before_capacity() {
        let store = UnitStore::new(nz!(1));

        assert!(matches!(
            store.write(5, 5000),
            Err(Error::OutOfRange { unit: 5, .. })
        ));
    }

    #[test]
    fn writes_are_visible_to_readers() {
        let store = UnitStore::new(nz!(2));
        let reader = store.reader();

        store.write(1, 42).unwrap();

        assert_eq!(reader.get(1), Some(42));
    }

    #[test]
    fn snapshot_is_taken_once() {
        let mut store = UnitStore::from_capacities(nonempty![10, 20]).unwrap();

        store.ensure_snapshot().unwrap();
        store.write(0, 11).unwrap();

        // The second call must not overwrite the snapshot with the modified values.
        store.ensure_snapshot().unwrap();
        store.write(1, 21).unwrap();

        assert!(store.restore_snapshot());
        assert_eq!(store.reader().to_vec(), vec![10, 20]);
    }

    #[test]
    fn restore_without_snapshot_is_noop() {
        let mut store = UnitStore::from_capacities(nonempty![10, 20]).unwrap();
        store.write(0, 5).unwrap();

        assert!(!store.restore_snapshot());
        assert_eq!(store.reader().to_vec(), vec![5, 20]);
    }

    #[test]
    fn restore_discards_snapshot() {
        let mut store = UnitStore::from_capacities(nonempty![10]).unwrap();

        store.ensure_snapshot().unwrap();
        store.write(0, 1).unwrap();
        assert!(store.restore_snapshot());
        assert!(!store.has_snapshot());

        store.write(0, 2).unwrap();
        assert!(!store.restore_snapshot());
        assert_eq!(store.read(0).unwrap(), 2);

        // A new snapshot captures the values current at that time.
        store.ensure_snapshot().unwrap();
        store.write(0, 3).unwrap();
        assert!(store.restore_snapshot());
        assert_eq!(store.read(0).unwrap(), 2);
    }
}
