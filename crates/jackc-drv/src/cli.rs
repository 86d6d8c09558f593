//! Command-line surface: one positional path, one debug flag.

use std::path::PathBuf;

use clap::Parser;

/// Compiles Jack source files to VM assembly.
#[derive(Parser, Debug)]
#[command(name = "jackc", about = "Jack-to-VM compiler", version)]
pub struct Cli {
    /// A `.jack` file, or a directory containing `.jack` files.
    pub path: PathBuf,

    /// Write a symbol-table trace for every compiled class to `debug.txt`.
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,
}

impl Cli {
    pub fn into_config(self) -> crate::Config {
        crate::Config {
            path: self.path,
            debug: self.debug,
        }
    }
}
