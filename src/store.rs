//! The INI file store.
//!
//! A [`Store`] owns a file path, an ordered set of sections and a dirty flag.
//! [`open()`](Store::open) loads and parses the file; [`close()`](Store::close)
//! renders it back and writes it, but only if something changed since the last
//! load or flush.
//!
//! All state lives in one cell shared by the store and every [`Section`] handle
//! it hands out, guarded by the store's [`Locking`] strategy. A section handle
//! addresses its section by name plus a per-section id, so a handle whose
//! section was replaced or flushed stops seeing it instead of aliasing a new
//! one.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::IniError;
use crate::file::{self, FileSystem, LocalFs};
use crate::lock::{Locking, Synchronized, Unsynchronized};
use crate::parse::{self, Entries};
use crate::section::{Section, convert};
use crate::types::Location;

/// A store whose operations each take a mutex; shareable across threads.
pub type SyncStore = Store<Synchronized>;

/// A store without locking; confined to one thread.
pub type UnsyncStore = Store<Unsynchronized>;

/// Typed access to an INI file with lazy write-back.
///
/// ```ignore
/// let store = Store::new("app.ini");
/// store.open_or_default()?;
/// let server = store.add_section("server");
/// server.write("port", 8080).write("host", "localhost");
/// let port: u16 = store.read("server", "port")?;
/// store.close()?;
/// ```
pub struct Store<L: Locking = Synchronized> {
    shared: Arc<Shared<L>>,
}

pub(crate) struct Shared<L: Locking> {
    pub(crate) path: PathBuf,
    fs: Box<dyn FileSystem>,
    pub(crate) state: L::Cell<State>,
}

pub(crate) struct State {
    sections: IndexMap<String, SectionData>,
    dirty: bool,
    next_id: u64,
}

struct SectionData {
    id: u64,
    entries: Entries,
}

impl State {
    fn new() -> Self {
        Self {
            sections: IndexMap::new(),
            dirty: false,
            next_id: 0,
        }
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The section called `name`, restricted to the given id when one is passed.
    fn slot(&self, name: &str, id: Option<u64>) -> Option<&SectionData> {
        self.sections
            .get(name)
            .filter(|data| id.is_none_or(|id| data.id == id))
    }

    fn slot_mut(&mut self, name: &str, id: Option<u64>) -> Option<&mut SectionData> {
        self.sections
            .get_mut(name)
            .filter(|data| id.is_none_or(|id| data.id == id))
    }

    pub(crate) fn section_id(&self, name: &str) -> Option<u64> {
        self.slot(name, None).map(|data| data.id)
    }

    pub(crate) fn entries(&self, name: &str, id: Option<u64>) -> Option<&Entries> {
        self.slot(name, id).map(|data| &data.entries)
    }

    /// Insert an empty section, replacing any section of the same name.
    pub(crate) fn add_section(&mut self, name: &str) -> u64 {
        let id = self.allocate_id();
        self.sections.insert(
            name.to_string(),
            SectionData {
                id,
                entries: Entries::new(),
            },
        );
        id
    }

    /// `None` when the section does not exist; `Some(None)` when the key does not.
    pub(crate) fn lookup(&self, name: &str, id: Option<u64>, key: &str) -> Option<Option<String>> {
        self.entries(name, id).map(|entries| entries.get(key).cloned())
    }

    /// Store `value` under `key`. Returns `false` when the section does not exist.
    pub(crate) fn write(&mut self, name: &str, id: Option<u64>, key: &str, value: String) -> bool {
        let Some(data) = self.slot_mut(name, id) else {
            return false;
        };
        data.entries.insert(key.to_string(), value);
        self.dirty = true;
        true
    }

    pub(crate) fn remove(&mut self, name: &str, id: Option<u64>, key: &str) -> Option<Option<String>> {
        let data = self.slot_mut(name, id)?;
        let removed = data.entries.shift_remove(key);
        if removed.is_some() {
            self.dirty = true;
        }
        Some(removed)
    }

    /// Replace every section with a freshly parsed document. The result is clean.
    fn replace(&mut self, document: IndexMap<String, Entries>) {
        let mut sections = IndexMap::with_capacity(document.len());
        for (name, entries) in document {
            let id = self.allocate_id();
            sections.insert(name, SectionData { id, entries });
        }
        self.sections = sections;
        self.dirty = false;
    }

    fn render(&self) -> String {
        parse::render_document(
            self.sections
                .iter()
                .map(|(name, data)| (name.as_str(), &data.entries)),
        )
    }

    /// Release every section after a flush.
    fn clear(&mut self) {
        for data in self.sections.values_mut() {
            data.entries.clear();
        }
        self.sections.clear();
        self.dirty = false;
    }
}

impl Store<Synchronized> {
    /// A synchronized store for `path` on the local file system.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_fs(path, LocalFs)
    }

    /// A synchronized store for `{dir}/{file_name}`, where `dir` is resolved from
    /// `location`. `app_name` is only used by [`Location::Platform`].
    pub fn locate(location: &Location, file_name: &str, app_name: &str) -> Result<Self, IniError> {
        let dir = file::resolve_location(location, app_name)
            .ok_or_else(|| IniError::Unresolvable(location.clone()))?;
        Ok(Self::new(dir.join(file_name)))
    }
}

impl Store<Unsynchronized> {
    /// An unsynchronized store for `path` on the local file system.
    pub fn unsynchronized(path: impl Into<PathBuf>) -> Self {
        Self::with_fs(path, LocalFs)
    }
}

impl<L: Locking> Store<L> {
    /// A store for `path` that performs its I/O through `fs`.
    pub fn with_fs(path: impl Into<PathBuf>, fs: impl FileSystem + 'static) -> Self {
        Self {
            shared: Arc::new(Shared {
                path: path.into(),
                fs: Box::new(fs),
                state: L::new_cell(State::new()),
            }),
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        L::with(&self.shared.state, f)
    }

    pub fn path(&self) -> &Path {
        &self.shared.path
    }

    /// Whether the backing file exists.
    pub fn exists(&self) -> bool {
        self.shared.fs.exists(&self.shared.path)
    }

    /// Whether anything was written since the last load, flush or construction.
    pub fn is_dirty(&self) -> bool {
        self.with_state(|state| state.dirty)
    }

    /// Load the backing file, replacing all sections.
    ///
    /// The store is clean afterwards; loading is not a modification.
    pub fn open(&self) -> Result<(), IniError> {
        let path = &self.shared.path;
        let text = self
            .shared
            .fs
            .read_to_string(path)
            .map_err(|source| IniError::FileAccess {
                path: path.clone(),
                source,
            })?;

        self.parse_from_text(&text);
        debug!(path = %path.display(), sections = self.section_names().len(), "opened ini file");
        Ok(())
    }

    /// [`open()`](Self::open) if the backing file exists, otherwise start empty.
    pub fn open_or_default(&self) -> Result<(), IniError> {
        if self.exists() {
            return self.open();
        }
        debug!(path = %self.shared.path.display(), "ini file not found, starting empty");
        self.with_state(|state| state.replace(IndexMap::new()));
        Ok(())
    }

    /// Write the store back to its file if it is dirty, then release all sections.
    ///
    /// A clean store performs no I/O. On a failed write nothing is released and
    /// the store stays dirty, so the caller may retry.
    pub fn close(&self) -> Result<(), IniError> {
        let path = &self.shared.path;
        self.with_state(|state| {
            if !state.dirty {
                debug!(path = %path.display(), "ini store clean, nothing to write");
                return Ok(());
            }

            let text = state.render();
            self.shared
                .fs
                .write(path, &text)
                .map_err(|source| IniError::FileAccess {
                    path: path.clone(),
                    source,
                })?;

            debug!(
                path = %path.display(),
                sections = state.sections.len(),
                bytes = text.len(),
                "flushed ini file"
            );
            state.clear();
            Ok(())
        })
    }

    /// Replace all sections with those parsed from `text`.
    pub fn parse_from_text(&self, text: &str) {
        let document = parse::parse_document(text);
        self.with_state(|state| state.replace(document));
    }

    /// Render all sections as INI text, in registration order.
    pub fn parse_to_text(&self) -> String {
        self.with_state(|state| state.render())
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.with_state(|state| state.section_id(name).is_some())
    }

    /// A handle to the section called `name`.
    pub fn section(&self, name: &str) -> Result<Section<L>, IniError> {
        let id = self
            .with_state(|state| state.section_id(name))
            .ok_or_else(|| missing_section(name))?;
        Ok(Section::new(Arc::clone(&self.shared), id, name))
    }

    /// Create an empty section, replacing any existing section called `name`.
    ///
    /// Handles to the replaced section become detached.
    pub fn add_section(&self, name: &str) -> Section<L> {
        let id = self.with_state(|state| state.add_section(name));
        Section::new(Arc::clone(&self.shared), id, name)
    }

    /// Delete a section. Returns whether it existed.
    pub fn remove_section(&self, name: &str) -> bool {
        self.with_state(|state| {
            let removed = state.sections.shift_remove(name).is_some();
            if removed {
                state.dirty = true;
            }
            removed
        })
    }

    pub fn section_names(&self) -> Vec<String> {
        self.with_state(|state| state.sections.keys().cloned().collect())
    }

    pub fn sections(&self) -> Vec<Section<L>> {
        self.with_state(|state| {
            state
                .sections
                .iter()
                .map(|(name, data)| Section::new(Arc::clone(&self.shared), data.id, name))
                .collect()
        })
    }

    pub fn has_key(&self, section: &str, key: &str) -> Result<bool, IniError> {
        self.with_state(|state| state.entries(section, None).map(|e| e.contains_key(key)))
            .ok_or_else(|| missing_section(section))
    }

    fn lookup(&self, section: &str, key: &str) -> Result<Option<String>, IniError> {
        self.with_state(|state| state.lookup(section, None, key))
            .ok_or_else(|| missing_section(section))
    }

    /// Read `key` from `section` as `T`.
    pub fn read<T>(&self, section: &str, key: &str) -> Result<T, IniError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let value = self
            .lookup(section, key)?
            .ok_or_else(|| IniError::MissingKey {
                section: section.to_string(),
                key: key.to_string(),
            })?;
        convert(section, key, value)
    }

    /// Read `key` from `section` as `T`, converting `default()` when the key is
    /// absent. The closure only runs on a miss, and the key is not inserted.
    pub fn read_or_else<T, F>(&self, section: &str, key: &str, default: F) -> Result<T, IniError>
    where
        T: FromStr,
        T::Err: fmt::Display,
        F: FnOnce() -> String,
    {
        let value = self.lookup(section, key)?.unwrap_or_else(default);
        convert(section, key, value)
    }

    pub fn read_or<T>(&self, section: &str, key: &str, default: &str) -> Result<T, IniError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.read_or_else(section, key, || default.to_string())
    }

    /// Store `value` under `key` in an existing `section`.
    pub fn write<T: fmt::Display>(&self, section: &str, key: &str, value: T) -> Result<(), IniError> {
        let value = value.to_string();
        if self.with_state(|state| state.write(section, None, key, value)) {
            Ok(())
        } else {
            Err(missing_section(section))
        }
    }

    /// Delete `key` from `section`, returning its previous value.
    pub fn remove_key(&self, section: &str, key: &str) -> Result<Option<String>, IniError> {
        self.with_state(|state| state.remove(section, None, key))
            .ok_or_else(|| missing_section(section))
    }
}

impl<L: Locking> fmt::Debug for Store<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("path", &self.shared.path)
            .field("sections", &self.section_names())
            .field("dirty", &self.is_dirty())
            .finish()
    }
}

fn missing_section(name: &str) -> IniError {
    IniError::MissingSection {
        section: name.to_string(),
    }
}
