//! Clap adapter for inistore.
//!
//! Compiled only with the `clap` Cargo feature (on by default). [`IniArgs`]
//! can be embedded in an application's clap derive to give it
//! `list|sections|get|set|unset` subcommands over one INI file.
//!
//! The only bridge to the core is [`IniArgs::into_action()`], which converts
//! parsed arguments into an [`IniAction`](crate::IniAction) for
//! [`ops::handle()`](crate::handle).

use clap::{Args, Subcommand};

use crate::types::IniAction;

/// Clap-derived args for an INI subcommand group.
///
/// ```ignore
/// #[derive(Subcommand)]
/// enum Commands {
///     Ini(IniArgs),
/// }
/// ```
#[derive(Debug, Args)]
pub struct IniArgs {
    #[command(subcommand)]
    pub action: Option<IniSubcommand>,
}

/// Available INI subcommands.
#[derive(Debug, Subcommand)]
pub enum IniSubcommand {
    /// Show every entry, or only those of one section.
    List {
        /// Section to list.
        section: Option<String>,
    },
    /// Show section names in file order.
    Sections,
    /// Print the value stored under a key.
    Get { section: String, key: String },
    /// Store a value, creating the section if needed.
    Set {
        section: String,
        key: String,
        value: String,
    },
    /// Remove a key from a section.
    Unset { section: String, key: String },
}

impl IniArgs {
    /// Convert clap-parsed args into a framework-agnostic `IniAction`.
    ///
    /// A bare invocation (no subcommand) lists everything.
    pub fn into_action(self) -> IniAction {
        match self.action {
            None => IniAction::List { section: None },
            Some(IniSubcommand::List { section }) => IniAction::List { section },
            Some(IniSubcommand::Sections) => IniAction::Sections,
            Some(IniSubcommand::Get { section, key }) => IniAction::Get { section, key },
            Some(IniSubcommand::Set {
                section,
                key,
                value,
            }) => IniAction::Set {
                section,
                key,
                value,
            },
            Some(IniSubcommand::Unset { section, key }) => IniAction::Unset { section, key },
        }
    }
}
