//! INI file operations and their result types.
//!
//! [`handle()`] runs one [`IniAction`] against a store: it loads the file (or
//! starts empty when there is none), applies the action and closes the store,
//! which only writes when the action changed something.

use std::fmt;

use serde::Serialize;

use crate::error::IniError;
use crate::lock::Locking;
use crate::store::Store;
use crate::types::IniAction;

/// One `key=value` entry together with the section it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListedEntry {
    pub section: String,
    pub key: String,
    pub value: String,
}

/// Result of an INI operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum IniResult {
    /// Entries in file order.
    Listing { entries: Vec<ListedEntry> },
    SectionNames { sections: Vec<String> },
    KeyValue {
        section: String,
        key: String,
        value: String,
    },
    ValueSet {
        section: String,
        key: String,
        value: String,
    },
    /// `previous` is `None` when the key was not there to begin with.
    ValueUnset {
        section: String,
        key: String,
        previous: Option<String>,
    },
}

impl IniResult {
    /// The result as a JSON document.
    pub fn to_json(&self) -> String {
        // Every field is a plain string, so serialization cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

impl fmt::Display for IniResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IniResult::Listing { entries } => {
                let mut current: Option<&str> = None;
                for (i, entry) in entries.iter().enumerate() {
                    if current != Some(entry.section.as_str()) {
                        if i > 0 {
                            writeln!(f)?;
                        }
                        writeln!(f, "[{}]", entry.section)?;
                        current = Some(entry.section.as_str());
                    }
                    writeln!(f, "{}={}", entry.key, entry.value)?;
                }
                Ok(())
            }
            IniResult::SectionNames { sections } => {
                for name in sections {
                    writeln!(f, "{name}")?;
                }
                Ok(())
            }
            IniResult::KeyValue { value, .. } => writeln!(f, "{value}"),
            IniResult::ValueSet {
                section,
                key,
                value,
            } => writeln!(f, "Set [{section}] {key}={value}"),
            IniResult::ValueUnset {
                section,
                key,
                previous: Some(_),
            } => writeln!(f, "Unset [{section}] {key}"),
            IniResult::ValueUnset { section, key, .. } => {
                writeln!(f, "[{section}] {key} was not set")
            }
        }
    }
}

/// Run `action` against `store`, persisting the file if the action modified it.
pub fn handle<L: Locking>(store: &Store<L>, action: &IniAction) -> Result<IniResult, IniError> {
    store.open_or_default()?;
    let result = apply(store, action);
    // Close even after a failed action so the store is released; nothing was
    // modified in that case, so no write happens.
    let closed = store.close();
    let result = result?;
    closed?;
    Ok(result)
}

fn apply<L: Locking>(store: &Store<L>, action: &IniAction) -> Result<IniResult, IniError> {
    match action {
        IniAction::List { section } => {
            let sections = match section {
                Some(name) => vec![store.section(name)?],
                None => store.sections(),
            };
            let entries = sections
                .iter()
                .flat_map(|s| {
                    s.keys().into_iter().zip(s.values()).map(move |(key, value)| ListedEntry {
                        section: s.name().to_string(),
                        key,
                        value,
                    })
                })
                .collect();
            Ok(IniResult::Listing { entries })
        }
        IniAction::Sections => Ok(IniResult::SectionNames {
            sections: store.section_names(),
        }),
        IniAction::Get { section, key } => Ok(IniResult::KeyValue {
            section: section.clone(),
            key: key.clone(),
            value: store.read(section, key)?,
        }),
        IniAction::Set {
            section,
            key,
            value,
        } => {
            let target = match store.section(section) {
                Ok(existing) => existing,
                Err(_) => store.add_section(section),
            };
            target.write(key, value);
            Ok(IniResult::ValueSet {
                section: section.clone(),
                key: key.clone(),
                value: value.clone(),
            })
        }
        IniAction::Unset { section, key } => Ok(IniResult::ValueUnset {
            section: section.clone(),
            key: key.clone(),
            previous: store.remove_key(section, key)?,
        }),
    }
}
