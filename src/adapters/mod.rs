// Adapters layer: concrete course-list sources (csv, json, in-memory).

pub mod csv_source;
pub mod json_source;
pub mod memory;

pub use csv_source::CsvCourseSource;
pub use json_source::JsonCourseSource;
pub use memory::InMemoryCourseSource;

use crate::domain::ports::CourseSource;
use crate::utils::error::Result;
use crate::utils::validation;
use std::path::Path;

/// 依副檔名選擇課程清單來源
pub fn course_source_for_path(path: impl AsRef<Path>) -> Result<Box<dyn CourseSource>> {
    let path = path.as_ref();
    let name = path.display().to_string();
    validation::validate_file_extension("courses", &name, &["csv", "json"])?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Box::new(JsonCourseSource::new(path))),
        _ => Ok(Box::new(CsvCourseSource::new(path))),
    }
}
