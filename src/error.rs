use std::path::PathBuf;

use thiserror::Error;

use crate::types::Location;

#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum IniError {
    #[error("Section [{section}] does not exist")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(inistore::missing_section),
            help("create it with add_section() or check the spelling; names are case-sensitive")
        )
    )]
    MissingSection { section: String },

    #[error("Key '{key}' not found in section [{section}]")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(inistore::missing_key),
            help("use read_or() / read_or_else() to fall back to a default")
        )
    )]
    MissingKey { section: String, key: String },

    #[error("Cannot read [{section}] {key} = '{value}' as {target}: {reason}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(inistore::conversion)))]
    Conversion {
        section: String,
        key: String,
        value: String,
        target: &'static str,
        reason: String,
    },

    #[error("Failed to access {path}: {source}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(inistore::file_access)))]
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot resolve location {0:?} (no home directory?)")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(inistore::unresolvable)))]
    Unresolvable(Location),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_names_key_and_section() {
        let err = IniError::MissingKey {
            section: "server".into(),
            key: "port".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'port'"));
        assert!(msg.contains("[server]"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn missing_section_formats() {
        let err = IniError::MissingSection {
            section: "database".into(),
        };
        assert!(err.to_string().contains("[database]"));
    }

    #[test]
    fn conversion_formats_value_and_target() {
        let err = IniError::Conversion {
            section: "server".into(),
            key: "port".into(),
            value: "eighty".into(),
            target: "u16",
            reason: "invalid digit found in string".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("eighty"));
        assert!(msg.contains("u16"));
        assert!(msg.contains("invalid digit"));
    }

    #[test]
    fn file_access_keeps_source() {
        use std::error::Error as _;

        let err = IniError::FileAccess {
            path: "/etc/app.ini".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/etc/app.ini"));
        assert!(err.source().is_some());
    }
}
