pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliArgs, OutputFormat};

pub use adapters::{CsvCourseSource, InMemoryCourseSource, JsonCourseSource};
pub use config::{ConstraintFile, ConstraintSpec};
pub use crate::core::{
    engine::{AuditEngine, AuditOutcome},
    report::{Rule, RuleOutcome, VerificationReport},
    verifier::ConstraintVerifier,
};
pub use domain::model::{AccreditationUnits, BreadthArea, CourseRecord};
pub use domain::ports::{ConstraintSource, CourseSource};
pub use utils::error::{AuditError, Result};
