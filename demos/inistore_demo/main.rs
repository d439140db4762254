//! # inistore demo application
//!
//! A small CLI over one INI file, showing how to wire [`IniArgs`] into a clap
//! app and run the resulting actions.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example inistore_demo -- set server port 8080
//! cargo run --example inistore_demo -- get server port
//! cargo run --example inistore_demo -- --json list
//! RUST_LOG=inistore=debug cargo run --example inistore_demo -- sections
//! ```
//!
//! Without `--file`, the demo uses `inistore-demo.ini` in the platform config
//! directory.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use inistore::{IniArgs, IniError, Location, Store, handle};

/// inistore demo — read and edit an INI file.
#[derive(Parser, Debug)]
#[command(name = "inistore-demo")]
struct Cli {
    /// INI file to operate on.
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(flatten)]
    ini: IniArgs,
}

fn open_store(file: Option<PathBuf>) -> Result<Store, IniError> {
    match file {
        Some(path) => Ok(Store::new(path)),
        None => Store::locate(&Location::Platform, "inistore-demo.ini", "inistore-demo"),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let action = cli.ini.into_action();

    let result = open_store(cli.file).and_then(|store| handle(&store, &action));
    match result {
        Ok(result) if cli.json => println!("{}", result.to_json()),
        Ok(result) => print!("{result}"),
        Err(e) => {
            eprintln!("Error:\n{e}");
            std::process::exit(1);
        }
    }
}
