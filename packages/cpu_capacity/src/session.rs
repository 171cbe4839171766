use std::num::NonZero;

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::{
    ApplyError, Capacity, CapacityReader, DEFAULT_MAX_SPEC_LEN, SessionBuilder, UnitId, UnitStore,
    apply,
};

/// Lifecycle of a [`Session`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[expect(
    clippy::exhaustive_enums,
    reason = "the lifecycle has exactly these states and no others are planned"
)]
pub enum SessionState {
    /// No non-blank capacity override list has been applied successfully yet.
    Uninitialized,

    /// At least one non-blank list has been applied. The store holds a snapshot of the values that
    /// were in place before the first change.
    Modified,

    /// The session has been torn down. Live values were reverted to the snapshot (if any) and no
    /// further changes are accepted.
    Restored,
}

/// Owns a [`UnitStore`] and serializes all changes to it, remembering the last applied capacity
/// override list and reverting every change on teardown.
///
/// This is the context object that a transport layer (command line, configuration file, RPC
/// endpoint and so on) wraps to expose capacity overrides to an operator. Dropping the session tears
/// it down.
///
/// # Example
///
/// ```
/// use cpu_capacity::{Session, SessionState, UnitStore};
/// use nonempty::nonempty;
///
/// let session = Session::new(UnitStore::from_capacities(nonempty![1024, 1024, 512, 512]).unwrap());
///
/// session.set("0-1:768\n").unwrap();
/// session.set("3:0").unwrap();
/// assert_eq!(session.state(), SessionState::Modified);
/// assert_eq!(session.get(), "3:0");
/// assert_eq!(session.render(), "3:0\n");
///
/// session.teardown();
/// assert_eq!(session.reader().to_vec(), vec![1024, 1024, 512, 512]);
/// ```
#[derive(Debug)]
pub struct Session {
    inner: Mutex<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    store: UnitStore,
    state: SessionState,

    // The last successfully applied list, bounded and with one trailing newline removed.
    applied_spec: String,

    // Maximum size of `applied_spec` in bytes, including one byte reserved for a terminator.
    max_spec_len: usize,
}

impl Session {
    /// Creates a session with default settings that takes ownership of `store`.
    #[must_use]
    pub fn new(store: UnitStore) -> Self {
        Self::from_parts(store, DEFAULT_MAX_SPEC_LEN)
    }

    /// Starts building a session that takes ownership of `store`.
    ///
    /// Use the builder to apply an initial capacity override list or to change how much of the
    /// applied list is remembered.
    pub fn builder(store: UnitStore) -> SessionBuilder {
        SessionBuilder::new(store)
    }

    pub(crate) fn from_parts(store: UnitStore, max_spec_len: NonZero<usize>) -> Self {
        info!(unit_count = store.unit_count(), "capacity session created");

        Self {
            inner: Mutex::new(SessionInner {
                store,
                state: SessionState::Uninitialized,
                applied_spec: String::new(),
                max_spec_len: max_spec_len.get(),
            }),
        }
    }

    /// Applies a capacity override list and, on success, remembers it for [`get()`][Self::get].
    ///
    /// See [`apply()`][crate::apply] for the processing rules. Blank lists succeed without changing
    /// anything. The remembered text is the list as given, minus one trailing newline, cut to the
    /// configured maximum length.
    ///
    /// # Errors
    ///
    /// Returns the [`ApplyError`] from processing the list, or one wrapping
    /// [`Error::Closed`][crate::Error::Closed] if the session has been torn down. On error, the
    /// remembered text and the session state are not changed, although units written before the
    /// failing segment keep their new values.
    pub fn set(&self, spec: &str) -> Result<(), ApplyError> {
        self.inner.lock().set(spec)
    }

    /// The last capacity override list applied successfully, or an empty string if there was none.
    #[must_use]
    pub fn get(&self) -> String {
        self.inner.lock().applied_spec.clone()
    }

    /// The last applied list followed by exactly one newline, as it is displayed to operators.
    #[must_use]
    pub fn render(&self) -> String {
        let inner = self.inner.lock();

        let mut rendered = String::with_capacity(inner.applied_spec.len().saturating_add(1));
        rendered.push_str(&inner.applied_spec);
        rendered.push('\n');
        rendered
    }

    /// Reverts every unit to the value it had before the first change and closes the session.
    ///
    /// Safe to call on a session that was never changed, and calling it again does nothing.
    pub fn teardown(&self) {
        self.inner.lock().teardown();
    }

    /// The current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.inner.lock().state
    }

    /// The number of units in the underlying store.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.inner.lock().store.unit_count()
    }

    /// The current capacity of `unit`, read while holding the session lock.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`][crate::Error::OutOfRange] if there is no such unit.
    pub fn capacity(&self, unit: UnitId) -> crate::Result<Capacity> {
        self.inner.lock().store.read(unit)
    }

    /// Returns a handle that reads live values without taking the session lock.
    #[must_use]
    pub fn reader(&self) -> CapacityReader {
        self.inner.lock().store.reader()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.inner.get_mut().teardown();
    }
}

impl SessionInner {
    fn set(&mut self, spec: &str) -> Result<(), ApplyError> {
        if self.state == SessionState::Restored {
            return Err(crate::Error::Closed.into());
        }

        if let Err(e) = apply(&mut self.store, spec) {
            warn!(error = %e, "capacity override list rejected");
            return Err(e);
        }

        if capacity_spec::is_blank(spec) {
            return Ok(());
        }

        let kept = bounded_spec(spec, self.max_spec_len);

        if spec.len() >= self.max_spec_len {
            warn!(
                len = spec.len(),
                max_len = self.max_spec_len,
                "capacity override list too long to remember in full, keeping a truncated copy"
            );
        }

        kept.clone_into(&mut self.applied_spec);
        self.state = SessionState::Modified;

        info!(spec = %self.applied_spec, "capacity override list applied");

        Ok(())
    }

    fn teardown(&mut self) {
        if self.state == SessionState::Restored {
            return;
        }

        self.store.restore_snapshot();
        self.state = SessionState::Restored;

        info!("capacity session torn down");
    }
}

/// Cuts `spec` to fit a buffer of `max_len` bytes that also holds a terminator, then drops one
/// trailing newline. The cut never splits a character.
fn bounded_spec(spec: &str, max_len: usize) -> &str {
    let limit = spec.len().min(max_len.saturating_sub(1));

    let end = (0..=limit)
        .rev()
        .find(|&index| spec.is_char_boundary(index))
        .unwrap_or(0);

    let kept = spec.get(..end).unwrap_or_default();
    kept.strip_suffix('\n').unwrap_or(kept)
}
