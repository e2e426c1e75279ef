use crate::domain::model::CourseRecord;
use crate::domain::ports::CourseSource;
use crate::utils::error::Result;

#[derive(Debug, Clone, Default)]
pub struct InMemoryCourseSource {
    courses: Vec<CourseRecord>,
}

impl InMemoryCourseSource {
    pub fn new(courses: Vec<CourseRecord>) -> Self {
        Self { courses }
    }
}

impl CourseSource for InMemoryCourseSource {
    fn load_courses(&self) -> Result<Vec<CourseRecord>> {
        Ok(self.courses.clone())
    }

    fn describe(&self) -> String {
        format!("memory:{} courses", self.courses.len())
    }
}
