//! Command bodies. Each returns the JSON value the binary prints.

use serde_json::{json, Map, Value};

use nebula::{ProjectStore, VariableRecord};

use crate::CliError;

/// Output format of `node describe`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeFormat {
    Json,
    Yaml,
}

/// `list`: `{files: [...]}`.
pub async fn list_projects(store: &dyn ProjectStore) -> Result<Value, CliError> {
    let files = store.list().await?;
    Ok(json!({ "files": files }))
}

/// `show NAME`: the same view `GET /load` returns.
pub async fn show_project(store: &dyn ProjectStore, name: &str) -> Result<Value, CliError> {
    let doc = store.load(name).await?;
    Ok(serde_json::to_value(doc.to_load_response())?)
}

/// `save NAME`: writes the project and returns `{ok, name, path}`.
pub async fn save_project(
    store: &dyn ProjectStore,
    name: &str,
    positive: &str,
    negative: &str,
    vars: &[VariableRecord],
) -> Result<Value, CliError> {
    let path = store.save(name, positive, negative, vars).await?;
    Ok(json!({
        "ok": true,
        "name": nebula::resolve_name(name),
        "path": path.display().to_string(),
    }))
}

/// `node describe`: the node descriptor as JSON, or as a YAML string.
pub fn describe_node(format: NodeFormat) -> Result<String, CliError> {
    let descriptor = nebula::descriptor();
    Ok(match format {
        NodeFormat::Json => serde_json::to_string_pretty(&descriptor)?,
        NodeFormat::Yaml => serde_yaml::to_string(&descriptor)?,
    })
}

/// `node run`: invokes the node through its descriptor and returns outputs keyed by name.
pub fn run_node(params: &Map<String, Value>) -> Value {
    let descriptor = nebula::descriptor();
    Value::Object((descriptor.invoke)(params).to_named())
}
