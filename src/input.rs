//! Common routines for handling input data.
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fmt::Display;
use std::fs;
use std::path::Path;

/// Read a TOML file at the specified path.
///
/// # Arguments
///
/// * `file_path` - Path to the TOML file
///
/// # Returns
///
/// * The deserialised TOML data or an error if the file could not be read or parsed.
pub fn read_toml<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let toml_str = fs::read_to_string(file_path).with_context(|| input_err_msg(file_path))?;
    let toml_data = toml::from_str(&toml_str).with_context(|| input_err_msg(file_path))?;
    Ok(toml_data)
}

/// Format an error message to include the file path. To be used with `anyhow::Context`.
pub fn input_err_msg<P: AsRef<Path>>(file_path: P) -> String {
    format!("Error reading {}", file_path.as_ref().display())
}

/// Parse a number typed into an input field.
///
/// A blank field is read as zero, as with the numeric parsing of an empty form field. Anything
/// else must be a valid number for the target type.
pub fn parse_field<T>(raw: &str) -> Result<T>
where
    T: std::str::FromStr + Default,
    T::Err: Display,
{
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(T::default());
    }

    raw.parse()
        .map_err(|err| anyhow::anyhow!("Invalid number \"{raw}\": {err}"))
}
