use crate::domain::model::{CourseRecord, CourseRow};
use crate::domain::ports::CourseSource;
use crate::utils::error::{AuditError, Result};
use std::path::{Path, PathBuf};

/// 從 JSON 陣列讀取課程，每個元素的欄位與 CSV 欄位相同
#[derive(Debug, Clone)]
pub struct JsonCourseSource {
    path: PathBuf,
}

impl JsonCourseSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CourseSource for JsonCourseSource {
    fn load_courses(&self) -> Result<Vec<CourseRecord>> {
        let source_name = self.path.display().to_string();
        let content = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AuditError::CourseDataError {
                source_name: source_name.clone(),
                message: "course list file not found".to_string(),
            },
            _ => AuditError::IoError(e),
        })?;

        parse_courses(&content, &source_name)
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}

pub fn parse_courses(content: &str, source_name: &str) -> Result<Vec<CourseRecord>> {
    let rows: Vec<CourseRow> = serde_json::from_str(content)?;

    rows.into_iter()
        .enumerate()
        .map(|(index, row)| {
            CourseRecord::try_from(row).map_err(|e| {
                tracing::error!("Invalid course at {} entry {}: {}", source_name, index, e);
                e
            })
        })
        .collect()
}
