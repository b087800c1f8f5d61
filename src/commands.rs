use crate::cli::RunArgs;
use crate::config::{default_config_path, default_log_path, init_config, load_config, Config};
use crate::form::BoardForm;
use crate::logging;
use crate::session::Session;
use crate::ui;
use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

pub fn run(config_path: Option<PathBuf>, log_file: Option<PathBuf>, args: RunArgs) -> Result<()> {
    let (config, config_path) = load_current_config(config_path)?;
    let log_path = match log_file.or_else(|| config.log_file.clone()) {
        Some(path) => path,
        None => default_log_path()?,
    };
    let _guard = logging::init(&log_path, &config.log_filter)?;
    info!(config = %config_path.display(), "starting retro");

    let form = BoardForm::prefilled(
        config.default_section_count,
        args.name,
        args.description,
        args.sections,
    );
    let session = Session::new(form, config.note_color.clone(), config.default_section_count);
    let result = ui::run(session, &config);
    info!("retro exited");
    result
}

pub fn config(config_path: Option<PathBuf>, init: bool) -> Result<()> {
    let path = match config_path {
        Some(path) => path,
        None => default_config_path()?,
    };
    if init {
        if init_config(&path)? {
            println!("Wrote default config to {}", path.display());
        } else {
            println!("Config already exists at {}", path.display());
        }
    }
    let config = load_config(&path)?;
    println!("Config: {}", path.display());
    print_config(&config);
    Ok(())
}

fn load_current_config(config_path: Option<PathBuf>) -> Result<(Config, PathBuf)> {
    let path = match config_path {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = load_config(&path)?;
    Ok((config, path))
}

fn print_config(config: &Config) {
    println!("  default_section_count: {}", config.default_section_count);
    println!("  note_color: {}", config.note_color);
    println!("  narrow_width: {}", config.narrow_width);
    println!("  log_filter: {}", config.log_filter);
    match &config.log_file {
        Some(path) => println!("  log_file: {}", path.display()),
        None => println!("  log_file: (default)"),
    }
}
