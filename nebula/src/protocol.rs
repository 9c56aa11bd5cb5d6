//! HTTP wire types for the `/nebula_image_manager` endpoints.
//!
//! Requests arrive as loosely shaped JSON from the browser UI, so [`SaveRequest`] is
//! read field by field from a [`serde_json::Value`] instead of being derived.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::variable::{self, text_of, VariableRecord, VariableSlot};

/// `GET /list` response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    pub files: Vec<String>,
}

/// `GET /load` response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadResponse {
    pub name: String,
    pub positive_prompt: String,
    pub negative_prompt: String,
    pub vars: Vec<VariableSlot>,
}

/// `POST /save` body after normalization.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SaveRequest {
    /// Unsanitized project name; the store resolves it.
    pub name: String,
    pub positive_prompt: String,
    pub negative_prompt: String,
    /// Always five slots; keys kept as sent.
    pub vars: Vec<VariableRecord>,
}

impl SaveRequest {
    /// Reads a save body. Returns `None` when the body is not a JSON object.
    pub fn from_value(body: &Value) -> Option<Self> {
        let obj = body.as_object()?;
        Some(Self {
            name: text_of(obj.get("name")),
            positive_prompt: text_of(obj.get("positive_prompt")),
            negative_prompt: text_of(obj.get("negative_prompt")),
            vars: variable::from_value(obj.get("vars")),
        })
    }
}

/// `POST /save` success response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponse {
    pub ok: bool,
    pub name: String,
}

/// Error body for every non-2xx response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
