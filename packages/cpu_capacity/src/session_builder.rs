use std::num::NonZero;

use new_zealand::nz;

use crate::{ApplyError, Session, UnitStore};

/// How many bytes of the last applied capacity override list a [`Session`] remembers by default,
/// including one byte reserved for a terminator.
pub const DEFAULT_MAX_SPEC_LEN: NonZero<usize> = nz!(256_usize);

/// Builds a [`Session`] with non-default settings.
///
/// # Example
///
/// ```
/// use cpu_capacity::{Session, UnitStore};
/// use new_zealand::nz;
///
/// let session = Session::builder(UnitStore::new(nz!(8)))
///     .initial_spec("0-3:1024,4-7:512")
///     .max_spec_len(nz!(64))
///     .build()
///     .unwrap();
///
/// assert_eq!(session.capacity(4).unwrap(), 512);
/// ```
#[derive(Debug)]
#[must_use]
pub struct SessionBuilder {
    store: UnitStore,
    initial_spec: Option<String>,
    max_spec_len: NonZero<usize>,
}

impl SessionBuilder {
    pub(crate) fn new(store: UnitStore) -> Self {
        Self {
            store,
            initial_spec: None,
            max_spec_len: DEFAULT_MAX_SPEC_LEN,
        }
    }

    /// A capacity override list to apply while building the session, as if passed to
    /// [`Session::set()`] right after creation.
    pub fn initial_spec(mut self, spec: impl Into<String>) -> Self {
        self.initial_spec = Some(spec.into());
        self
    }

    /// How many bytes of the last applied list to remember, including one byte reserved for a
    /// terminator. Longer lists are still applied in full; only the remembered copy is cut.
    ///
    /// Defaults to [`DEFAULT_MAX_SPEC_LEN`].
    pub fn max_spec_len(mut self, max_spec_len: NonZero<usize>) -> Self {
        self.max_spec_len = max_spec_len;
        self
    }

    /// Creates the session and applies the initial capacity override list, if any.
    ///
    /// # Errors
    ///
    /// Returns the [`ApplyError`] from applying the initial list. Any changes it made before failing
    /// are reverted before the error is returned.
    pub fn build(self) -> Result<Session, ApplyError> {
        let session = Session::from_parts(self.store, self.max_spec_len);

        if let Some(spec) = self.initial_spec {
            // On error, dropping the session reverts whatever the failed list managed to write.
            session.set(&spec)?;
        }

        Ok(session)
    }
}
