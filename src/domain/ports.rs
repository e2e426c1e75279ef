use crate::config::ConstraintSpec;
use crate::domain::model::CourseRecord;
use crate::utils::error::Result;

/// 課程清單來源；驗證器不做去重，來源提供幾筆就計算幾筆
pub trait CourseSource: Send + Sync {
    fn load_courses(&self) -> Result<Vec<CourseRecord>>;
    fn describe(&self) -> String;
}

/// 約束設定來源；找不到或格式錯誤時回傳設定錯誤
pub trait ConstraintSource: Send + Sync {
    fn load_constraints(&self) -> Result<ConstraintSpec>;
    fn describe(&self) -> String;
}

impl<T: CourseSource + ?Sized> CourseSource for Box<T> {
    fn load_courses(&self) -> Result<Vec<CourseRecord>> {
        (**self).load_courses()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
