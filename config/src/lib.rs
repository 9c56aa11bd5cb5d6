//! Configuration for Nebula.
//!
//! - [`load_and_apply`]: merge XDG `config.toml` and project `.env` into the process
//!   environment with priority **existing env > .env > XDG**.
//! - [`Settings`]: typed view of the `NEBULA_*` variables once the environment is set.
//! - `logging` (feature `tracing-init`): shared `tracing-subscriber` setup for binaries.

mod dotenv;
#[cfg(feature = "tracing-init")]
pub mod logging;
mod settings;
mod xdg_toml;

use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

pub use settings::{Settings, DEFAULT_ADDR, ENV_ADDR, ENV_BASE_PATH, ENV_LOG_DIR};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
}

/// Picks the value for every key found in `.env` or XDG that is not already present
/// according to `is_set`. `.env` wins over XDG.
fn merge_missing(
    dotenv: HashMap<String, String>,
    xdg: HashMap<String, String>,
    is_set: impl Fn(&str) -> bool,
) -> Vec<(String, String)> {
    let mut merged = xdg;
    merged.extend(dotenv);
    let mut out: Vec<(String, String)> = merged.into_iter().filter(|(k, _)| !is_set(k)).collect();
    out.sort();
    out
}

/// Loads `$XDG_CONFIG_HOME/<app_name>/config.toml` (`[env]` table) and the project `.env`
/// (`override_dir` or current directory), then sets only the variables that are not
/// already set in the process environment.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<(), LoadError> {
    let xdg = xdg_toml::load_env_map(app_name)?;
    let dotenv = dotenv::load_env_map(override_dir).map_err(LoadError::DotenvRead)?;

    for (key, value) in merge_missing(dotenv, xdg, |k| std::env::var_os(k).is_some()) {
        std::env::set_var(key, value);
    }
    Ok(())
}
