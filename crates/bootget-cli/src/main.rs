use bootget_core::logging;

mod cli;

use crate::cli::Cli;
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    // Initialize logging as early as possible; a broken state dir must not stop a download.
    let level = cli.log_level.as_deref();
    if let Err(err) = logging::init_logging(level) {
        logging::init_logging_stderr(level);
        tracing::warn!("file logging unavailable, using stderr: {:#}", err);
    }

    if let Err(err) = cli.run() {
        eprintln!("bootget error: {:#}", err);
        std::process::exit(1);
    }
}
