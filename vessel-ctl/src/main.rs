//! vessel - run containers bound to your working directory and repository

mod cli;
mod commands;
mod logging;
mod runner;

use clap::Parser;
use cli::{Cli, Commands};
use commands::check_engine;
use console::style;
use runner::run_container;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_logger(cli.log.level(), cli.log.log_format);

    let args = match cli.command {
        Some(Commands::Check) => {
            if !check_engine().await {
                std::process::exit(1);
            }
            return;
        }
        Some(Commands::Run { args }) => args,
        None => cli.args,
    };

    match run_container(cli.run.into_config(args)).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {}", style("error:").red().bold(), e);
            std::process::exit(1);
        }
    }
}
