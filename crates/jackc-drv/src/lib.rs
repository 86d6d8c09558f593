//! The driver: CLI parsing, `.jack` source discovery, per-file compilation,
//! and `.vm`/`debug.txt` output. Everything in this crate is ambient
//! infrastructure around [`jackc_engine::CompilationEngine`] — no Jack
//! grammar or code-generation logic lives here.

pub mod cli;
pub mod discover;

use std::fs;
use std::io::Write as _;
use std::path::PathBuf;

use jackc_engine::CompilationEngine;
use jackc_util::{DriverError, DriverResult};
use tracing::{debug, info};

pub use cli::Cli;
pub use discover::discover_jack_files;

/// Resolved configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    pub path: PathBuf,
    pub debug: bool,
}

/// One driver invocation: the files to compile and the optional shared
/// debug-file handle. Compilation is sequential — at most one file is ever
/// mid-compile, so `debug.txt` never needs synchronization.
pub struct Session {
    config: Config,
    sources: Vec<PathBuf>,
}

impl Session {
    pub fn new(config: Config) -> DriverResult<Self> {
        let sources = discover_jack_files(&config.path)
            .map_err(|e| DriverError::Io { path: config.path.clone(), source: e })?;
        if sources.is_empty() {
            return Err(DriverError::NoInputFiles(config.path.clone()));
        }
        Ok(Self { config, sources })
    }

    /// Compiles every discovered source file, writing one `.vm` sibling per
    /// file and, if enabled, appending each class's debug trace to
    /// `debug.txt`. Stops and propagates on the first failing file — there
    /// is no partial-run recovery.
    pub fn compile(&self) -> DriverResult<()> {
        let mut debug_file = if self.config.debug {
            Some(
                fs::File::create("debug.txt")
                    .map_err(|e| DriverError::Io { path: PathBuf::from("debug.txt"), source: e })?,
            )
        } else {
            None
        };

        for source_path in &self.sources {
            info!(path = %source_path.display(), "compiling");
            self.compile_one(source_path, debug_file.as_mut())?;
        }
        Ok(())
    }

    fn compile_one(&self, source_path: &PathBuf, mut debug_file: Option<&mut fs::File>) -> DriverResult<()> {
        let source = fs::read_to_string(source_path)
            .map_err(|e| DriverError::Io { path: source_path.clone(), source: e })?;

        debug!(path = %source_path.display(), "running compilation engine");
        let engine = CompilationEngine::new(&source);

        if let Some(file) = debug_file.as_deref_mut() {
            let (vm_text, class_table, subroutine_dumps) = engine.compile_with_tables()?;
            self.write_output(source_path, &vm_text)?;

            let mut dump = String::new();
            class_table.dump("class", &mut dump).expect("writing to a String cannot fail");
            for subroutine_dump in &subroutine_dumps {
                dump.push_str(subroutine_dump);
            }
            file.write_all(dump.as_bytes())
                .map_err(|e| DriverError::Io { path: PathBuf::from("debug.txt"), source: e })?;
        } else {
            let vm_text = engine.compile()?;
            self.write_output(source_path, &vm_text)?;
        }

        Ok(())
    }

    fn write_output(&self, source_path: &PathBuf, vm_text: &str) -> DriverResult<()> {
        let output_path = source_path.with_extension("vm");
        fs::write(&output_path, vm_text).map_err(|e| DriverError::Io { path: output_path, source: e })
    }
}
