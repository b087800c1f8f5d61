use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "retro", version, about = "Terminal retrospective board")]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Launch the interactive board
    Run(RunArgs),
    /// Show the config location and effective settings
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Pre-fill the board name
    #[arg(long)]
    pub name: Option<String>,
    /// Pre-fill the board description
    #[arg(long)]
    pub description: Option<String>,
    /// Section title (repeatable, sets the section count)
    #[arg(long = "section", short = 's')]
    pub sections: Vec<String>,
}
