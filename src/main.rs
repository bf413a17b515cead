mod cli;
mod config;
mod extractors;
mod reporting;
mod scanner;
mod types;

use colored::Colorize;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,storefront_scrape=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let result = match cli::parse() {
        Ok(config) => {
            init_tracing(config.verbose);
            scanner::workflow::run(config).await
        }
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "[!]".red().bold(), e);
        std::process::exit(1);
    }
}
