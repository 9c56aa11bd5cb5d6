//! Project store: one pretty-printed JSON document per project under a fixed folder.
//!
//! [`ProjectStore`] is the seam the HTTP handlers and the CLI depend on;
//! [`FsProjectStore`] is the file-system implementation rooted at
//! `<base>/Nebula-Image-Manager`. No locking: each save writes its own temp file and
//! renames it over the target, so concurrent saves to the same name all succeed and
//! the last rename wins.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

use crate::protocol::LoadResponse;
use crate::variable::{self, text_of, VariableRecord, MAX_VARS};

/// Folder created under the configured base path to hold project files.
pub const STORE_FOLDER_NAME: &str = "Nebula-Image-Manager";

const JSON_EXT: &str = ".json";

/// Error from [`ProjectStore`] operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("project name is required")]
    InvalidName,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("failed to read JSON: {0}")]
    Read(String),
    #[error("failed to write JSON: {0}")]
    Write(String),
    #[error("storage: {0}")]
    Io(String),
}

/// Resolves a user-supplied project name to a file name inside the store folder.
///
/// Trims whitespace, replaces `\`, `/` and `..` with `_`, and appends `.json` unless the
/// name already ends with it (case-insensitive). Returns an empty string when nothing
/// is left, meaning "no valid name".
pub fn resolve_name(raw: &str) -> String {
    let name = raw
        .trim()
        .replace('\\', "_")
        .replace('/', "_")
        .replace("..", "_");
    if name.is_empty() {
        return name;
    }
    if name.to_lowercase().ends_with(JSON_EXT) {
        name
    } else {
        format!("{}{}", name, JSON_EXT)
    }
}

/// A stored project, as written to disk.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProjectDocument {
    /// Sanitized file name, always ending in `.json`.
    pub project: String,
    pub positive_prompt: String,
    pub negative_prompt: String,
    pub variables: Vec<VariableRecord>,
}

impl ProjectDocument {
    /// Builds a document for saving: variables truncated to [`MAX_VARS`] and every
    /// typed value recomputed.
    pub fn new(
        project: impl Into<String>,
        positive_prompt: impl Into<String>,
        negative_prompt: impl Into<String>,
        variables: &[VariableRecord],
    ) -> Self {
        Self {
            project: project.into(),
            positive_prompt: positive_prompt.into(),
            negative_prompt: negative_prompt.into(),
            variables: variables
                .iter()
                .take(MAX_VARS)
                .map(VariableRecord::recomputed)
                .collect(),
        }
    }

    /// Reads a document from parsed JSON, tolerating older and partial shapes.
    ///
    /// `positive_prompt` falls back to the legacy `prompt` field when missing or empty.
    /// Variables go through [`variable::from_value`], so the result always has five slots.
    pub fn from_json(project: impl Into<String>, data: &Value) -> Result<Self, StoreError> {
        let obj = data
            .as_object()
            .ok_or_else(|| StoreError::Read("expected a JSON object".to_string()))?;
        let positive = [obj.get("positive_prompt"), obj.get("prompt")]
            .into_iter()
            .map(text_of)
            .find(|s| !s.is_empty())
            .unwrap_or_default();
        Ok(Self {
            project: project.into(),
            positive_prompt: positive,
            negative_prompt: text_of(obj.get("negative_prompt")),
            variables: variable::from_value(obj.get("variables")),
        })
    }

    /// The load view returned to the UI: `vars` without typed values.
    pub fn to_load_response(&self) -> LoadResponse {
        LoadResponse {
            name: self.project.clone(),
            positive_prompt: self.positive_prompt.clone(),
            negative_prompt: self.negative_prompt.clone(),
            vars: self.variables.iter().map(VariableRecord::slot).collect(),
        }
    }
}

/// Storage for project documents.
///
/// - `list`: file names of all stored projects, sorted case-insensitively.
/// - `load`: one project by (unsanitized) name, variables normalized to five slots.
/// - `save`: create or overwrite one project; returns the written path.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn list(&self) -> Result<Vec<String>, StoreError>;

    async fn load(&self, name: &str) -> Result<ProjectDocument, StoreError>;

    async fn save(
        &self,
        name: &str,
        positive: &str,
        negative: &str,
        variables: &[VariableRecord],
    ) -> Result<PathBuf, StoreError>;
}

/// File-system project store. The root folder is created on first use.
#[derive(Clone, Debug)]
pub struct FsProjectStore {
    root: PathBuf,
}

impl FsProjectStore {
    /// Store rooted at `<base>/Nebula-Image-Manager`.
    pub fn new(base: impl AsRef<Path>) -> Self {
        Self::with_root(base.as_ref().join(STORE_FOLDER_NAME))
    }

    /// Store rooted directly at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn ensure_root(&self) -> std::io::Result<&Path> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(&self.root)
    }
}

/// Per-save temp file next to the target. Unique per process and call so overlapping
/// saves of one project never share it.
fn temp_path(root: &Path, name: &str) -> PathBuf {
    static SEQ: AtomicU64 = AtomicU64::new(0);
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    root.join(format!(".{}.{}.{}.tmp", name, std::process::id(), seq))
}

#[async_trait]
impl ProjectStore for FsProjectStore {
    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let root = self
            .ensure_root()
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        let mut entries = tokio::fs::read_dir(root)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?
        {
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !name.to_lowercase().ends_with(JSON_EXT) {
                continue;
            }
            let is_file = tokio::fs::metadata(entry.path())
                .await
                .map(|m| m.is_file())
                .unwrap_or(false);
            if is_file {
                files.push(name);
            }
        }
        files.sort_by_key(|a| a.to_lowercase());
        debug!(count = files.len(), root = %root.display(), "listed projects");
        Ok(files)
    }

    async fn load(&self, name: &str) -> Result<ProjectDocument, StoreError> {
        let name = resolve_name(name);
        if name.is_empty() {
            return Err(StoreError::InvalidName);
        }
        let root = self
            .ensure_root()
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        let path = root.join(&name);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StoreError::NotFound(name));
        }

        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| StoreError::Read(e.to_string()))?;
        let data: Value = serde_json::from_str(&raw).map_err(|e| StoreError::Read(e.to_string()))?;
        debug!(project = %name, "loaded project");
        ProjectDocument::from_json(name, &data)
    }

    async fn save(
        &self,
        name: &str,
        positive: &str,
        negative: &str,
        variables: &[VariableRecord],
    ) -> Result<PathBuf, StoreError> {
        let name = resolve_name(name);
        if name.is_empty() {
            return Err(StoreError::InvalidName);
        }
        let doc = ProjectDocument::new(name.as_str(), positive, negative, variables);
        let raw = serde_json::to_vec_pretty(&doc).map_err(|e| StoreError::Write(e.to_string()))?;

        let root = self
            .ensure_root()
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;
        let path = root.join(&name);
        let tmp = temp_path(root, &name);
        let written = match tokio::fs::write(&tmp, raw).await {
            Ok(()) => tokio::fs::rename(&tmp, &path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StoreError::Write(e.to_string()));
        }

        info!(project = %name, path = %path.display(), "saved project");
        Ok(path)
    }
}
