mod cli;

use std::process;

use structopt::StructOpt;

use cli::commands::Command;
use cli::Sensibot;

fn main() {
    env_logger::init();

    #[cfg(feature = "instrumentation")]
    sensibot::instrumentation::init_tracing();

    let result = Sensibot::from_args().execute();

    #[cfg(feature = "instrumentation")]
    sensibot::instrumentation::print_timing_statistics();

    if let Err(error) = result {
        eprintln!("error: {}", error);
        process::exit(1);
    }
}
