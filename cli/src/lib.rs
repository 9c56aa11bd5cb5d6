//! Library side of the `nebula` CLI: variable flag parsing, command bodies, and output
//! helpers. `main.rs` only parses arguments and dispatches here, so everything below is
//! testable without spawning the binary.

mod commands;
mod output;
mod vars;

pub use commands::{describe_node, list_projects, run_node, save_project, show_project, NodeFormat};
pub use output::{read_json_object, write_json};
pub use vars::{build_vars, parse_var};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("invalid --var {0:?}: expected KEY:TYPE:VALUE")]
    BadVar(String),
    #[error("too many --var flags: {0} given, at most {max}", max = nebula::MAX_VARS)]
    TooManyVars(usize),
    #[error("node input must be a JSON object")]
    NotAnObject,
    #[error("serve: {0}")]
    Serve(String),
    #[error("store: {0}")]
    Store(#[from] nebula::StoreError),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
