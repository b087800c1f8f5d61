mod cli;
mod commands;
mod config;
mod dnd;
mod form;
mod input;
mod layout;
mod logging;
mod model;
mod notes;
mod session;
mod ui;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let command = args
        .command
        .unwrap_or_else(|| cli::Command::Run(cli::RunArgs::default()));
    match command {
        cli::Command::Run(run) => commands::run(args.config, args.log_file, run),
        cli::Command::Config { init } => commands::config(args.config, init),
    }
}
