//! Type coercion: raw slot text to a typed value.
//!
//! Every conversion is fail-soft. Malformed numbers degrade to the zero value of
//! their type and never surface as errors, so a half-typed field in the UI still
//! produces something usable downstream.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a variable slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarType {
    #[default]
    String,
    Int,
    Float,
}

impl VarType {
    /// All recognized tags, in the order the node's type selector lists them.
    pub const ALL: [VarType; 3] = [VarType::String, VarType::Int, VarType::Float];

    /// Normalizes a free-form tag: trims, lowercases, and maps anything unrecognized
    /// (including the empty string) to [`VarType::String`].
    pub fn normalize(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "int" => VarType::Int,
            "float" => VarType::Float,
            _ => VarType::String,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VarType::String => "string",
            VarType::Int => "int",
            VarType::Float => "float",
        }
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coerced value of a slot. Serialized untagged: a JSON string, integer, or float.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypedValue {
    Int(i64),
    Float(f64),
    String(String),
}

impl Default for TypedValue {
    fn default() -> Self {
        TypedValue::String(String::new())
    }
}

/// String form of a typed value: strings verbatim, integers in base 10, floats
/// always carrying a fractional part when integral (`7.0`, not `7`).
impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::String(s) => f.write_str(s),
            TypedValue::Int(n) => write!(f, "{}", n),
            TypedValue::Float(x) => write_float(f, *x),
        }
    }
}

/// Shortest round-trip digits. Decimal exponents below -4 or from 16 up switch to
/// scientific notation with a signed, two-digit exponent (`1e+16`, `1.5e-07`).
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        return f.write_str("nan");
    }
    if x.is_infinite() {
        return f.write_str(if x < 0.0 { "-inf" } else { "inf" });
    }
    let sci = format!("{:e}", x);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    if x != 0.0 && !(-4..16).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        write!(f, "{}e{}{:02}", mantissa, sign, exp.abs())
    } else if x.fract() == 0.0 {
        write!(f, "{:.1}", x)
    } else {
        write!(f, "{}", x)
    }
}

/// Coerces `raw` according to `ty`. `None` is treated as the empty string.
///
/// - `Int`: base-10 integer, surrounding whitespace tolerated; anything else is `0`.
/// - `Float`: finite floating point, surrounding whitespace tolerated; anything else is `0.0`.
/// - `String`: the raw text unchanged.
pub fn coerce(ty: VarType, raw: Option<&str>) -> TypedValue {
    let raw = raw.unwrap_or("");
    match ty {
        VarType::Int => TypedValue::Int(raw.trim().parse::<i64>().unwrap_or(0)),
        VarType::Float => TypedValue::Float(
            raw.trim()
                .parse::<f64>()
                .ok()
                .filter(|x| x.is_finite())
                .unwrap_or(0.0),
        ),
        VarType::String => TypedValue::String(raw.to_string()),
    }
}
