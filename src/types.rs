use std::path::PathBuf;

/// Where an INI file lives.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    /// Platform config directory (XDG on Linux, ~/Library/Application Support on macOS).
    Platform,
    /// A subdirectory under the user's home directory, e.g. `Home(".myapp")`.
    Home(&'static str),
    /// Current working directory.
    Cwd,
    /// An explicit directory.
    Path(PathBuf),
}

/// An operation on an INI file, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum IniAction {
    /// Every entry, or only the entries of one section.
    List { section: Option<String> },
    Sections,
    Get { section: String, key: String },
    /// Creates the section when it does not exist yet.
    Set {
        section: String,
        key: String,
        value: String,
    },
    Unset { section: String, key: String },
}
