//! Common functionality for opdays, a calculator comparing monthly profit when a business opens
//! for five, six or seven days a week.
#![warn(missing_docs)]
use anyhow::{Context, Result};
use std::path::PathBuf;

pub mod chart;
pub mod cli;
pub mod format;
pub mod input;
pub mod log;
pub mod parameters;
pub mod scenario;
pub mod settings;
pub mod store;
pub mod units;
pub mod view;

/// Get the directory where opdays stores its configuration files
pub fn get_opdays_config_dir() -> Result<PathBuf> {
    let mut path = dirs::config_dir().context("Could not determine the user config directory")?;
    path.push("opdays");

    Ok(path)
}
