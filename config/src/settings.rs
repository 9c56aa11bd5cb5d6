//! Typed settings read from `NEBULA_*` environment variables.

use std::path::PathBuf;

/// Base directory under which the project folder is created.
pub const ENV_BASE_PATH: &str = "NEBULA_BASE_PATH";
/// Listen address of the HTTP server.
pub const ENV_ADDR: &str = "NEBULA_ADDR";
/// Directory for `nebula.log`; logs go to stderr when unset.
pub const ENV_LOG_DIR: &str = "NEBULA_LOG_DIR";

pub const DEFAULT_ADDR: &str = "127.0.0.1:8188";

/// Runtime settings. Unset or empty variables fall back to defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Store base path; projects live in `<base_path>/Nebula-Image-Manager`. Default: current directory.
    pub base_path: PathBuf,
    /// Listen address. Default: [`DEFAULT_ADDR`].
    pub addr: String,
    pub log_dir: Option<PathBuf>,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup` (key -> value); used by tests to avoid touching env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            base_path: get(ENV_BASE_PATH)
                .map(PathBuf::from)
                .or_else(|| std::env::current_dir().ok())
                .unwrap_or_else(|| PathBuf::from(".")),
            addr: get(ENV_ADDR).unwrap_or_else(|| DEFAULT_ADDR.to_string()),
            log_dir: get(ENV_LOG_DIR).map(PathBuf::from),
        }
    }
}
