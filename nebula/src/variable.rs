//! Variable records and the normalizer that builds the fixed five-slot list.
//!
//! Two entry points feed the same shape:
//! - [`from_params`]: flat `var_{i}_name` / `var_{i}_type` / `var_{i}_value` parameters
//!   (the processing node's inputs). Keys are trimmed here.
//! - [`from_list`]: a JSON list of `{key, type, value}` objects (stored documents and
//!   HTTP save bodies). Keys are kept as given.
//!
//! Output is always exactly [`MAX_VARS`] records, slot 1 at index 0.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::coerce::{coerce, TypedValue, VarType};

/// Number of variable slots in a project.
pub const MAX_VARS: usize = 5;

/// One persisted variable slot.
///
/// `typed_value` is derived from `(ty, value)` and is recomputed on every save;
/// a stored `typedValue` is never read back.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct VariableRecord {
    pub key: String,
    #[serde(rename = "type")]
    pub ty: VarType,
    pub value: String,
    #[serde(rename = "typedValue")]
    pub typed_value: TypedValue,
}

impl VariableRecord {
    /// Builds a record and computes its typed value.
    pub fn new(key: impl Into<String>, ty: VarType, value: impl Into<String>) -> Self {
        let value = value.into();
        let typed_value = coerce(ty, Some(&value));
        Self {
            key: key.into(),
            ty,
            value,
            typed_value,
        }
    }

    /// An unused slot: empty key and value, `string` type.
    pub fn empty() -> Self {
        Self::new("", VarType::String, "")
    }

    /// Returns a copy with `typed_value` recomputed from `(ty, value)`.
    pub fn recomputed(&self) -> Self {
        Self::new(self.key.clone(), self.ty, self.value.clone())
    }

    /// True when both key and value are blank. Such a slot is unused regardless of its type.
    pub fn is_unused(&self) -> bool {
        self.key.trim().is_empty() && self.value.trim().is_empty()
    }

    /// Wire projection without the typed value.
    pub fn slot(&self) -> VariableSlot {
        VariableSlot {
            key: self.key.clone(),
            ty: self.ty,
            value: self.value.clone(),
        }
    }
}

/// Three-field slot shape exchanged with the UI (`vars` in HTTP bodies).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableSlot {
    pub key: String,
    #[serde(rename = "type")]
    pub ty: VarType,
    pub value: String,
}

/// Renders a loosely typed JSON value as slot text. `null` and missing are `""`.
pub(crate) fn text_of(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

fn record_from(key: String, ty: Option<&Value>, value: Option<&Value>) -> VariableRecord {
    let ty = VarType::normalize(&text_of(ty));
    VariableRecord::new(key, ty, text_of(value))
}

/// Builds the five slots from flat node parameters (`var_1_name` .. `var_5_value`).
pub fn from_params(params: &Map<String, Value>) -> Vec<VariableRecord> {
    (1..=MAX_VARS)
        .map(|i| {
            let key = text_of(params.get(&format!("var_{}_name", i)))
                .trim()
                .to_string();
            record_from(
                key,
                params.get(&format!("var_{}_type", i)),
                params.get(&format!("var_{}_value", i)),
            )
        })
        .collect()
}

/// Builds the five slots from a JSON list of `{key, type, value}` objects.
///
/// Entries past the fifth are ignored, missing entries are padded, and entries that
/// are not objects count as empty slots.
pub fn from_list(items: &[Value]) -> Vec<VariableRecord> {
    (0..MAX_VARS)
        .map(|i| match items.get(i).and_then(Value::as_object) {
            Some(item) => record_from(text_of(item.get("key")), item.get("type"), item.get("value")),
            None => VariableRecord::empty(),
        })
        .collect()
}

/// Like [`from_list`] but accepts any JSON value; anything other than an array yields
/// five empty slots.
pub fn from_value(value: Option<&Value>) -> Vec<VariableRecord> {
    match value {
        Some(Value::Array(items)) => from_list(items),
        _ => from_list(&[]),
    }
}
