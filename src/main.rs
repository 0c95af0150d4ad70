mod cli;
mod error;
mod export;
mod extractor;
mod fmt;
mod models;
mod normalize;
mod settings;
mod sheet;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::extract::ExtractArgs;
use cli::{Cli, Commands};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let path = settings::settings_path(cli.config.as_deref());

    let result = match cli.command {
        Commands::Init { force } => cli::init::run(&path, force),
        Commands::Config => settings::load_settings(&path).and_then(|s| cli::config::run(&path, &s)),
        Commands::Extract {
            file,
            output,
            sheet,
            preview,
            stdout,
        } => settings::load_settings(&path).and_then(|s| {
            cli::extract::run(
                &s,
                ExtractArgs {
                    file,
                    output,
                    sheet,
                    preview,
                    stdout,
                },
            )
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
