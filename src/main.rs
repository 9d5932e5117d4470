//! rpalert - query ReportPortal launches and failed test cases

use clap::Parser;

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod filter;
mod models;
mod observe;
mod output;

use cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = cli::report::run(&cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// Warnings by default, `RUST_LOG` when set, debug with `--debug`
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}
