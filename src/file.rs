//! File access for INI stores.
//!
//! The store never touches `std::fs` directly. It goes through the
//! [`FileSystem`] trait, which exposes the three primitives an INI store
//! needs: check existence, read the whole file as text, write the whole text
//! back. [`LocalFs`] is the real implementation; tests substitute a recording
//! one to observe exactly when the store decides to write.
//!
//! # Locations
//!
//! [`resolve_location`] maps a [`Location`] to a concrete directory:
//!
//! - `Platform` — the OS config directory for `app_name`, via `directories`.
//! - `Home(subdir)` — `subdir` under the user's home directory.
//! - `Cwd` — the current working directory.
//! - `Path(dir)` — `dir` as given.
//!
//! Resolution returns `None` when the directory cannot be determined (no home
//! directory, unreadable CWD).

use std::io;
use std::path::{Path, PathBuf};

use crate::types::Location;

/// The file primitives an INI store is built on.
///
/// Implementations must be shareable across threads since a synchronized
/// store may be used from several of them.
pub trait FileSystem: Send + Sync {
    /// Whether `path` exists.
    fn exists(&self, path: &Path) -> bool;

    /// Read the entire file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Replace the entire file with `contents`.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// [`FileSystem`] backed by `std::fs`.
///
/// Writes create missing parent directories first.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)
    }
}

/// Resolve a [`Location`] to a concrete directory.
///
/// `app_name` is used by `Location::Platform` to construct the platform-specific
/// config directory (e.g. `~/.config/{app_name}/` on Linux).
pub fn resolve_location(location: &Location, app_name: &str) -> Option<PathBuf> {
    match location {
        Location::Platform => {
            let proj = directories::ProjectDirs::from("", "", app_name)?;
            Some(proj.config_dir().to_path_buf())
        }
        Location::Home(subdir) => {
            let user = directories::UserDirs::new()?;
            Some(user.home_dir().join(subdir))
        }
        Location::Cwd => std::env::current_dir().ok(),
        Location::Path(p) => Some(p.clone()),
    }
}
