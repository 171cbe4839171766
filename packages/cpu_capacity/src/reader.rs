use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{Capacity, UnitId};

/// Lock-free read access to the live capacity table of a [`UnitStore`][crate::UnitStore].
///
/// This is what consumers of the capacity values (e.g. a scheduler) hold on to. A value written to
/// the store is visible through every reader as soon as the write returns. Readers may observe a
/// capacity override list in the middle of being applied; use [`Session::get()`][1] if you need to
/// know what was last applied in full.
///
/// Cloning a reader is cheap and all clones observe the same table.
///
/// [1]: crate::Session::get
#[derive(Clone, Debug)]
pub struct CapacityReader {
    cells: Arc<[AtomicU64]>,
}

impl CapacityReader {
    pub(crate) fn new(cells: Arc<[AtomicU64]>) -> Self {
        Self { cells }
    }

    /// The number of units in the table.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.cells.len()
    }

    /// The current capacity of `unit`, or `None` if there is no such unit.
    #[must_use]
    pub fn get(&self, unit: UnitId) -> Option<Capacity> {
        let index = usize::try_from(unit).ok()?;

        self.cells
            .get(index)
            .map(|cell| cell.load(Ordering::Acquire))
    }

    /// The current capacity of every unit, in unit order.
    ///
    /// Each value is read independently, so this is not an atomic snapshot of the whole table.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Capacity> {
        self.cells
            .iter()
            .map(|cell| cell.load(Ordering::Acquire))
            .collect()
    }
}
