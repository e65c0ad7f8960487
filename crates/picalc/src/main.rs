//! PiCalc-rs: parallel Chudnovsky π calculator.

use picalc_lib::{app, config, errors};
use tracing_subscriber::EnvFilter;

fn main() {
    let config = config::AppConfig::parse();

    // Initialize tracing; -v raises the default level to INFO
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(config.log_level().into()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = app::run(&config) {
        picalc_cli::ui::print_error(&format!("{err:#}"));
        std::process::exit(errors::exit_code(&err));
    }
}
