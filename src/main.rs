use autogen_worker::cli::{self, Cli};
use clap::Parser;
use colored::*;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    cli::init_logging();

    let cli = Cli::parse();
    if let Err(e) = cli::run(cli).await {
        eprintln!("{} {:#}", "Error:".bright_red(), e);
        std::process::exit(1);
    }
}
