use clap::Parser;
use jackc_drv::{Cli, Session};
use jackc_util::DriverError;

/// Exit codes per the external interface contract: 0 success, 1 invalid
/// arguments, 2 input could not be opened or failed to compile.
const EXIT_USAGE: i32 = 1;
const EXIT_FAILURE: i32 = 2;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // clap's own exit codes don't match this tool's 1/2 split, so errors are
    // handled by hand rather than via `Cli::parse()`.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            use clap::error::ErrorKind;
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                print!("{err}");
                std::process::exit(0);
            }
            eprint!("{err}");
            std::process::exit(EXIT_USAGE);
        }
    };

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(match err {
            DriverError::NoInputFiles(_) => EXIT_USAGE,
            DriverError::Io { .. } | DriverError::Compile(_) => EXIT_FAILURE,
        });
    }
}

fn run(cli: Cli) -> Result<(), DriverError> {
    let config = cli.into_config();
    let session = Session::new(config)?;
    session.compile()
}
