use songsara_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible; if the XDG state dir is not
    // usable, log to stderr instead of refusing to run.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and run.
    if let Err(err) = Cli::run_from_args().await {
        eprintln!("songsara-dl error: {:#}", err);
        std::process::exit(1);
    }
}
