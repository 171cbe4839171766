use capacity_spec::{CapacityToken, is_blank, parse_token, segments};
use tracing::trace;

use crate::{ApplyError, UnitStore};

/// Applies a capacity override list to `store`.
///
/// A blank list (nothing but whitespace) is accepted without touching the store. Any other list
/// first makes the store capture a snapshot of the original values (if it does not already hold
/// one), even if the list then turns out to be invalid.
///
/// Segments are parsed and applied left to right, and each segment writes its units in ascending
/// order. Processing stops at the first segment that fails to parse or the first unit that fails to
/// be written. Everything written before that point stays written.
///
/// Most callers want [`Session::set()`][crate::Session::set], which also serializes access and
/// remembers the last applied list.
///
/// # Errors
///
/// Returns an [`ApplyError`] carrying the index of the failing segment and the reason, or an
/// [`ApplyError`] without a segment if the snapshot could not be allocated.
///
/// # Example
///
/// ```
/// use cpu_capacity::{UnitStore, apply};
/// use new_zealand::nz;
///
/// let mut store = UnitStore::new(nz!(4));
///
/// let error = apply(&mut store, "0:100, 1:2000").unwrap_err();
/// assert_eq!(error.segment(), Some(1));
///
/// // The first segment was applied before the second one failed.
/// assert_eq!(store.read(0).unwrap(), 100);
/// assert_eq!(store.read(1).unwrap(), 1024);
/// ```
pub fn apply(store: &mut UnitStore, spec: &str) -> Result<(), ApplyError> {
    if is_blank(spec) {
        trace!("blank capacity override list, nothing to apply");
        return Ok(());
    }

    store.ensure_snapshot()?;

    for segment in segments(spec) {
        let token = parse_token(segment.text())
            .map_err(|e| ApplyError::in_segment(segment.index(), e))?;

        apply_token(store, &token).map_err(|e| ApplyError::in_segment(segment.index(), e))?;
    }

    Ok(())
}

fn apply_token(store: &UnitStore, token: &CapacityToken) -> crate::Result<()> {
    for unit in token.units() {
        store.write(unit, token.capacity())?;
    }

    trace!(%token, "capacity segment applied");

    Ok(())
}
