use crate::domain::model::{CourseRecord, CourseRow};
use crate::domain::ports::CourseSource;
use crate::utils::error::{AuditError, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

/// 從 CSV 課程資料表讀取課程
///
/// 必要欄位為 `course_code` 與 `credits`；其餘欄位 (area、kernel、CEAB 各項 AU) 可省略或留空。
#[derive(Debug, Clone)]
pub struct CsvCourseSource {
    path: PathBuf,
}

impl CsvCourseSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CourseSource for CsvCourseSource {
    fn load_courses(&self) -> Result<Vec<CourseRecord>> {
        let source_name = self.path.display().to_string();
        let file = std::fs::File::open(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AuditError::CourseDataError {
                source_name: source_name.clone(),
                message: "course list file not found".to_string(),
            },
            _ => AuditError::IoError(e),
        })?;

        read_courses(file, &source_name)
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }
}

pub fn read_courses<R: Read>(reader: R, source_name: &str) -> Result<Vec<CourseRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut courses = Vec::new();
    for (index, row) in csv_reader.deserialize::<CourseRow>().enumerate() {
        // 第 1 行為標題列
        let line = index + 2;
        let row = row?;
        let course = CourseRecord::try_from(row).map_err(|e| {
            tracing::error!("Invalid course at {} line {}: {}", source_name, line, e);
            e
        })?;
        tracing::debug!("Loaded {}", course);
        courses.push(course);
    }

    Ok(courses)
}
