use clap::Parser;
use quest_runner::cli::Cli;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match quest_runner::run(&cli) {
        Ok(summary) if cli.strict && summary.failed > 0 => process::exit(1),
        Ok(_) => {}
        Err(error) => {
            tracing::error!("{error:#}");
            process::exit(1);
        }
    }
}
