//! Imputation module for filling missing values.
//!
//! The fill policies exposed by the cleaner (mean, median) bottom out here.

mod statistical;

pub use statistical::StatisticalImputer;
