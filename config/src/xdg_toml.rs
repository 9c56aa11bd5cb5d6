//! Load the `[env]` table from `$XDG_CONFIG_HOME/<app>/config.toml`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::LoadError;

/// `$XDG_CONFIG_HOME` when set and non-empty, else the platform config dir (if any).
fn config_home() -> Option<PathBuf> {
    match std::env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs::config_dir(),
    }
}

#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    env: HashMap<String, String>,
}

/// Reads the `[env]` table of one TOML file. A missing file yields an empty map.
pub(crate) fn load_env_map_from(path: &Path) -> Result<HashMap<String, String>, LoadError> {
    if !path.is_file() {
        return Ok(HashMap::new());
    }
    let content = std::fs::read_to_string(path).map_err(LoadError::XdgRead)?;
    let config: ConfigFile = toml::from_str(&content)?;
    Ok(config.env)
}

/// Returns the `[env]` table of `<config home>/<app_name>/config.toml`. Without a config
/// home (no `HOME`, no `XDG_CONFIG_HOME`) there is nothing to read.
pub fn load_env_map(app_name: &str) -> Result<HashMap<String, String>, LoadError> {
    match config_home() {
        Some(home) => load_env_map_from(&home.join(app_name).join("config.toml")),
        None => Ok(HashMap::new()),
    }
}
