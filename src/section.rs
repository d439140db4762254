use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::warn;

use crate::error::IniError;
use crate::lock::{Locking, Synchronized};
use crate::parse;
use crate::store::{Shared, State};

/// A handle to one named section of a [`Store`](crate::Store).
///
/// Values are always stored as strings. [`write()`](Self::write) stores a
/// value's `Display` form; the `read*` methods parse it back with `FromStr`.
///
/// Handles are cheap to clone and share the store's lock. A handle is tied to
/// the section it was created for: once that section is replaced (by
/// `add_section` with the same name or by `open`) or released (by `close`), the
/// handle is detached. Detached handles read as empty and ignore writes.
pub struct Section<L: Locking = Synchronized> {
    shared: Arc<Shared<L>>,
    id: u64,
    name: String,
}

impl<L: Locking> Section<L> {
    pub(crate) fn new(shared: Arc<Shared<L>>, id: u64, name: &str) -> Self {
        Self {
            shared,
            id,
            name: name.to_string(),
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        L::with(&self.shared.state, f)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this handle still refers to a section of its store.
    pub fn is_attached(&self) -> bool {
        self.with_state(|state| state.entries(&self.name, Some(self.id)).is_some())
    }

    pub fn keys(&self) -> Vec<String> {
        self.with_state(|state| {
            state
                .entries(&self.name, Some(self.id))
                .map(|entries| entries.keys().cloned().collect())
                .unwrap_or_default()
        })
    }

    pub fn values(&self) -> Vec<String> {
        self.with_state(|state| {
            state
                .entries(&self.name, Some(self.id))
                .map(|entries| entries.values().cloned().collect())
                .unwrap_or_default()
        })
    }

    pub fn len(&self) -> usize {
        self.with_state(|state| state.entries(&self.name, Some(self.id)).map_or(0, |e| e.len()))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.with_state(|state| {
            state
                .entries(&self.name, Some(self.id))
                .is_some_and(|entries| entries.contains_key(key))
        })
    }

    /// Store `value` under `key`, overwriting any previous value, and mark the
    /// store dirty.
    pub fn write<T: fmt::Display>(&self, key: &str, value: T) -> &Self {
        let value = value.to_string();
        if !self.with_state(|state| state.write(&self.name, Some(self.id), key, value)) {
            warn!(section = %self.name, key, "write to detached section ignored");
        }
        self
    }

    /// Delete `key`, returning its previous value.
    pub fn remove(&self, key: &str) -> Option<String> {
        self.with_state(|state| state.remove(&self.name, Some(self.id), key))
            .flatten()
    }

    fn lookup(&self, key: &str) -> Option<String> {
        self.with_state(|state| state.lookup(&self.name, Some(self.id), key))
            .flatten()
    }

    /// Read `key` as `T`. Fails with [`IniError::MissingKey`] if it is absent.
    pub fn read<T>(&self, key: &str) -> Result<T, IniError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let value = self.lookup(key).ok_or_else(|| IniError::MissingKey {
            section: self.name.clone(),
            key: key.to_string(),
        })?;
        convert(&self.name, key, value)
    }

    /// Read `key` as `T`, converting `default()` instead when the key is absent.
    ///
    /// `default` runs only on a miss and outside the store lock. The key is not
    /// inserted.
    pub fn read_or_else<T, F>(&self, key: &str, default: F) -> Result<T, IniError>
    where
        T: FromStr,
        T::Err: fmt::Display,
        F: FnOnce() -> String,
    {
        let value = self.lookup(key).unwrap_or_else(default);
        convert(&self.name, key, value)
    }

    pub fn read_or<T>(&self, key: &str, default: &str) -> Result<T, IniError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.read_or_else(key, || default.to_string())
    }

    /// Like [`read()`](Self::read), but stores into `out` and returns the
    /// section for chaining. `out` is left untouched on failure.
    pub fn read_into<T>(&self, key: &str, out: &mut T) -> Result<&Self, IniError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        *out = self.read(key)?;
        Ok(self)
    }

    /// Like [`read_or_else()`](Self::read_or_else), but stores into `out` and
    /// returns the section for chaining.
    pub fn read_into_or_else<T, F>(&self, key: &str, default: F, out: &mut T) -> Result<&Self, IniError>
    where
        T: FromStr,
        T::Err: fmt::Display,
        F: FnOnce() -> String,
    {
        *out = self.read_or_else(key, default)?;
        Ok(self)
    }

    /// This section as an INI stanza: `[name]` then one `key=value` line per
    /// entry, joined by `\r\n`.
    pub fn render(&self) -> String {
        self.with_state(|state| match state.entries(&self.name, Some(self.id)) {
            Some(entries) => parse::render_section(&self.name, entries),
            None => parse::render_section(&self.name, &parse::Entries::new()),
        })
    }
}

impl<L: Locking> Clone for Section<L> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            id: self.id,
            name: self.name.clone(),
        }
    }
}

impl<L: Locking> fmt::Debug for Section<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Section")
            .field("name", &self.name)
            .field("path", &self.shared.path)
            .field("keys", &self.keys())
            .finish()
    }
}

/// Parse a stored string as `T`, naming the entry on failure.
pub(crate) fn convert<T>(section: &str, key: &str, value: String) -> Result<T, IniError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.parse::<T>().map_err(|e| IniError::Conversion {
        section: section.to_string(),
        key: key.to_string(),
        target: std::any::type_name::<T>(),
        reason: e.to_string(),
        value,
    })
}
