pub mod inference;
pub mod parse;
pub mod types;

pub use inference::{infer_profile, DatasetProfiler};
pub use types::{ColumnKind, DatasetProfile};
