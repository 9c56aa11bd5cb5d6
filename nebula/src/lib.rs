//! # Nebula
//!
//! Named prompt projects stored as flat JSON files: a positive/negative prompt pair plus
//! five positional, typed variable slots.
//!
//! ## Main modules
//!
//! - [`coerce`]: [`VarType`], [`TypedValue`], [`coerce`](coerce::coerce). Fail-soft conversion of slot
//!   text to string, integer, or float.
//! - [`variable`]: [`VariableRecord`], [`VariableSlot`], [`from_params`], [`from_list`]. Builds the
//!   fixed five-slot list from node parameters or JSON lists.
//! - [`store`]: [`ProjectStore`] trait, [`FsProjectStore`], [`resolve_name`], [`ProjectDocument`].
//! - [`protocol`]: HTTP wire types ([`ListResponse`], [`LoadResponse`], [`SaveRequest`],
//!   [`SaveResponse`], [`ErrorResponse`]).
//! - [`node`]: the processing node ([`NodeDescriptor`], [`descriptor`], [`run_node`]).

pub mod coerce;
pub mod node;
pub mod protocol;
pub mod store;
pub mod variable;

pub use coerce::{TypedValue, VarType};
pub use node::{descriptor, run as run_node, NodeDescriptor, NodeOutputs, OUTPUT_NAMES};
pub use protocol::{ErrorResponse, ListResponse, LoadResponse, SaveRequest, SaveResponse};
pub use store::{
    resolve_name, FsProjectStore, ProjectDocument, ProjectStore, StoreError, STORE_FOLDER_NAME,
};
pub use variable::{from_list, from_params, VariableRecord, VariableSlot, MAX_VARS};
