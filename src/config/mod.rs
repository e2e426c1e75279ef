#[cfg(feature = "cli")]
pub mod cli;
pub mod constraints;

pub use constraints::{ConstraintFile, ConstraintSpec, DEFAULT_CAPSTONE_CODE};
