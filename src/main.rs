use clap::Parser;
use fan_replacement_sim::cli::{self, Cli};
use fan_replacement_sim::logging;

fn main() -> std::process::ExitCode {
    logging::init_tracing();
    let cli = Cli::parse();
    cli::exit_code(cli::run(&cli))
}
