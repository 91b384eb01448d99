pub mod analysis;
pub mod anova;
pub mod descriptive;
pub mod extract;
pub mod grouping;
pub mod ttest;
pub mod types;

pub use analysis::analyze;
pub use extract::extract_columns;
pub use types::StatisticalReport;
