//! `--var KEY:TYPE:VALUE` flags to variable records.

use nebula::{VarType, VariableRecord, MAX_VARS};

use crate::CliError;

/// Parses one `KEY:TYPE:VALUE` flag. The value may itself contain `:`; the key is kept
/// as given and the type goes through the usual normalization (unknown → `string`).
pub fn parse_var(spec: &str) -> Result<VariableRecord, CliError> {
    let mut parts = spec.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(ty), Some(value)) => {
            Ok(VariableRecord::new(key, VarType::normalize(ty), value))
        }
        _ => Err(CliError::BadVar(spec.to_string())),
    }
}

/// Builds the five slots from `--var` flags in order, padding with empty slots.
pub fn build_vars(specs: &[String]) -> Result<Vec<VariableRecord>, CliError> {
    if specs.len() > MAX_VARS {
        return Err(CliError::TooManyVars(specs.len()));
    }
    let mut vars = specs
        .iter()
        .map(|s| parse_var(s))
        .collect::<Result<Vec<_>, _>>()?;
    vars.resize_with(MAX_VARS, VariableRecord::empty);
    Ok(vars)
}
