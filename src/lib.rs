//! Typed, lazily persisted INI configuration files.
//!
//! Inistore keeps an INI file in memory as an ordered set of named sections
//! holding `key=value` entries, gives you typed reads and writes on top, and
//! writes the file back only when something actually changed.
//!
//! ```ignore
//! let store = Store::new("app.ini");
//! store.open_or_default()?;
//!
//! let server = store.add_section("server");
//! server.write("host", "localhost").write("port", 8080);
//!
//! let port: u16 = store.read("server", "port")?;
//! let timeout: u32 = store.read_or("server", "timeout", "30")?;
//!
//! store.close()?; // writes app.ini, because something changed
//! ```
//!
//! # Data model
//!
//! A [`Store`] owns a file path, its sections and a dirty flag. Each
//! [`Section`] is a name plus string entries. Values are always stored as
//! text:
//!
//! - [`write()`](Section::write) accepts anything `Display` and stores its
//!   canonical string form: integers in base 10, floats in Rust's shortest
//!   round-trip form, booleans as `true`/`false`.
//! - The `read*` methods accept anything `FromStr` and parse the stored text
//!   back. A value that does not parse is an [`IniError::Conversion`], which is
//!   always distinct from a missing key.
//!
//! Section and key names are case-sensitive. Sections and entries keep their
//! insertion order, so a loaded file is written back in the same order.
//!
//! # Reading with defaults
//!
//! | Method | Missing key |
//! |--------|-------------|
//! | [`read`](Section::read) | [`IniError::MissingKey`] |
//! | [`read_or`](Section::read_or) | converts the given default |
//! | [`read_or_else`](Section::read_or_else) | calls the closure, converts its result |
//! | [`read_into`](Section::read_into) / [`read_into_or_else`](Section::read_into_or_else) | same, but fill an out-parameter and return the section for chaining |
//!
//! Defaults are never inserted into the section. `read_or_else` only runs
//! its closure on a miss, so an expensive default costs nothing on a hit.
//!
//! The same reads and writes exist on [`Store`], addressed by section name;
//! they fail with [`IniError::MissingSection`] when the section does not
//! exist.
//!
//! # Lazy write-back
//!
//! [`open()`](Store::open) loads the file and leaves the store clean. Any
//! write (or removal) marks it dirty. [`close()`](Store::close) writes the
//! file only when the store is dirty, then releases every section. A store
//! that was only read never touches the file on close.
//!
//! # File format
//!
//! ```text
//! ; whole-line comment
//! [server]
//!     host = localhost   ; inline comment
//! port=8080
//! ```
//!
//! - `;` starts a comment, either on its own line or after a value.
//! - Leading whitespace is ignored; keys and values are trimmed of spaces.
//! - `\n` and `\r\n` are both accepted; `\r\n` is written.
//! - Lines that are not a header and do not hold exactly one `=` are skipped
//!   silently, as are entries before the first header. Parsing never fails.
//! - There is no escaping: values cannot contain `;`, `=` or newlines.
//!
//! # Thread safety
//!
//! The locking mode is part of the store's type:
//!
//! - [`SyncStore`] (`Store<Synchronized>`, the default) takes one mutex per
//!   operation. The store and its section handles are `Send + Sync`.
//! - [`UnsyncStore`] (`Store<Unsynchronized>`) does no locking and is
//!   confined to its thread by the compiler.
//!
//! A store and all of its sections share a single lock. The lock guards
//! in-process access only; it is not a file lock.
//!
//! # File access
//!
//! All I/O goes through the [`FileSystem`] trait. [`Store::new`] uses
//! [`LocalFs`]; [`Store::with_fs`] takes any implementation.
//! [`Store::locate`] builds the path from a [`Location`] such as the platform
//! config directory.
//!
//! # Operations
//!
//! [`handle()`] runs an [`IniAction`] (list, sections, get, set, unset)
//! against a store and returns an [`IniResult`] for display or JSON output.
//! With the `clap` feature (on by default), [`IniArgs`] provides matching
//! subcommands.
//!
//! # Error handling
//!
//! All fallible operations return [`IniError`]. Enable the `rich-errors`
//! feature to get [`miette`](https://docs.rs/miette) diagnostics with codes
//! and help text.

pub mod error;
pub mod types;

#[cfg(feature = "clap")]
mod cli;
mod file;
mod lock;
mod ops;
mod parse;
mod section;
mod store;

#[cfg(test)]
mod fixtures;

#[cfg(feature = "clap")]
pub use cli::{IniArgs, IniSubcommand};
pub use error::IniError;
pub use file::{FileSystem, LocalFs, resolve_location};
pub use lock::{Locking, Synchronized, Unsynchronized};
pub use ops::{IniResult, ListedEntry, handle};
pub use parse::{Entries, parse_document, render_document};
pub use section::Section;
pub use store::{Store, SyncStore, UnsyncStore};
pub use types::{IniAction, Location};
