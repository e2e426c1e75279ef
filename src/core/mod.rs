pub mod engine;
pub mod report;
pub mod verifier;

pub use crate::domain::model::{AccreditationUnits, BreadthArea, CourseRecord};
pub use crate::domain::ports::{ConstraintSource, CourseSource};
pub use crate::utils::error::Result;
