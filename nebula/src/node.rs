//! Processing node: project text plus five variable slots in, seven strings out.
//!
//! The node is exported as a plain [`NodeDescriptor`] (name, input spec, output spec,
//! invoke function) so any host can register it without reaching into global state.
//! Interaction: [`variable::from_params`] for the slots, the `Display` impl of
//! [`crate::TypedValue`] for the string form of each slot.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::coerce::VarType;
use crate::variable::{self, text_of, VariableRecord, MAX_VARS};

pub const NODE_NAME: &str = "NebulaPromptManager";
pub const NODE_DISPLAY_NAME: &str = "Nebula Prompt Manager";
pub const NODE_CATEGORY: &str = "Nebula";

/// Output names in emission order.
pub const OUTPUT_NAMES: [&str; 2 + MAX_VARS] = [
    "Positive",
    "Negative",
    "Variable_1",
    "Variable_2",
    "Variable_3",
    "Variable_4",
    "Variable_5",
];

/// Value kind of a node input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "UPPERCASE")]
pub enum InputKind {
    String { multiline: bool },
    Choice { choices: Vec<String> },
}

/// One declared input of the node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InputSpec {
    pub name: String,
    #[serde(flatten)]
    pub kind: InputKind,
    pub default: String,
}

impl InputSpec {
    fn text(name: impl Into<String>, multiline: bool) -> Self {
        Self {
            name: name.into(),
            kind: InputKind::String { multiline },
            default: String::new(),
        }
    }

    fn var_type(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: InputKind::Choice {
                choices: VarType::ALL.iter().map(|t| t.as_str().to_string()).collect(),
            },
            default: VarType::String.as_str().to_string(),
        }
    }
}

/// One declared output of the node. All outputs are strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OutputSpec {
    pub name: String,
    pub kind: &'static str,
}

/// Everything a host needs to register and call the node.
#[derive(Clone, Serialize)]
pub struct NodeDescriptor {
    pub name: &'static str,
    pub display_name: &'static str,
    pub category: &'static str,
    pub inputs: Vec<InputSpec>,
    pub outputs: Vec<OutputSpec>,
    #[serde(skip)]
    pub invoke: fn(&Map<String, Value>) -> NodeOutputs,
}

impl fmt::Debug for NodeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeDescriptor")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("inputs", &self.inputs.len())
            .field("outputs", &self.outputs.len())
            .finish_non_exhaustive()
    }
}

/// Descriptor of the prompt manager node.
pub fn descriptor() -> NodeDescriptor {
    let mut inputs = vec![
        InputSpec::text("project_name", false),
        InputSpec::text("positive_prompt", true),
        InputSpec::text("negative_prompt", true),
    ];
    for i in 1..=MAX_VARS {
        inputs.push(InputSpec::text(format!("var_{}_name", i), false));
        inputs.push(InputSpec::var_type(format!("var_{}_type", i)));
        inputs.push(InputSpec::text(format!("var_{}_value", i), false));
    }
    NodeDescriptor {
        name: NODE_NAME,
        display_name: NODE_DISPLAY_NAME,
        category: NODE_CATEGORY,
        inputs,
        outputs: OUTPUT_NAMES
            .iter()
            .map(|name| OutputSpec {
                name: name.to_string(),
                kind: "STRING",
            })
            .collect(),
        invoke: run,
    }
}

/// The node's seven outputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeOutputs {
    pub positive: String,
    pub negative: String,
    pub variables: [String; MAX_VARS],
}

impl NodeOutputs {
    /// Outputs in emission order (positive, negative, var1..var5).
    pub fn into_vec(self) -> Vec<String> {
        let mut out = Vec::with_capacity(OUTPUT_NAMES.len());
        out.push(self.positive);
        out.push(self.negative);
        out.extend(self.variables);
        out
    }

    /// Outputs keyed by [`OUTPUT_NAMES`].
    pub fn to_named(&self) -> Map<String, Value> {
        OUTPUT_NAMES
            .iter()
            .zip(self.clone().into_vec())
            .map(|(name, value)| (name.to_string(), Value::String(value)))
            .collect()
    }
}

/// String output of one slot: empty for an unused slot, else the typed value's string form.
pub fn slot_output(record: &VariableRecord) -> String {
    if record.is_unused() {
        String::new()
    } else {
        record.typed_value.to_string()
    }
}

/// Runs the node on flat inputs. `project_name` is informational and not looked up.
///
/// Never fails: missing or malformed inputs degrade to empty strings and zero values.
pub fn run(params: &Map<String, Value>) -> NodeOutputs {
    let mut variables: [String; MAX_VARS] = Default::default();
    for (out, record) in variables.iter_mut().zip(variable::from_params(params).iter()) {
        *out = slot_output(record);
    }
    NodeOutputs {
        positive: text_of(params.get("positive_prompt")),
        negative: text_of(params.get("negative_prompt")),
        variables,
    }
}
