use crate::utils::error::{AuditError, Result};
use crate::utils::validation::Validate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// 分類領域 (breadth area) 的數量，編號為 1..=6
pub const AREA_COUNT: u8 = 6;

/// 課程所屬的分類領域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct BreadthArea(u8);

impl BreadthArea {
    pub fn new(number: u8) -> Result<Self> {
        if (1..=AREA_COUNT).contains(&number) {
            Ok(Self(number))
        } else {
            Err(AuditError::invalid_course(
                "area",
                number,
                format!("area must be between 1 and {}", AREA_COUNT),
            ))
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = BreadthArea> {
        (1..=AREA_COUNT).map(BreadthArea)
    }
}

impl TryFrom<u8> for BreadthArea {
    type Error = AuditError;

    fn try_from(number: u8) -> Result<Self> {
        Self::new(number)
    }
}

impl From<BreadthArea> for u8 {
    fn from(area: BreadthArea) -> u8 {
        area.0
    }
}

impl fmt::Display for BreadthArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Area {}", self.0)
    }
}

/// CEAB 認證單位 (AU) 的分類明細
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccreditationUnits {
    pub total: f64,
    pub mathematics: f64,
    pub natural_science: f64,
    pub math_and_science: f64,
    pub engineering_science: f64,
    pub engineering_design: f64,
    pub eng_sci_and_design: f64,
    pub complementary_studies: f64,
}

impl AccreditationUnits {
    fn fields(&self) -> [(&'static str, f64); 8] {
        [
            ("total_au", self.total),
            ("mathematics", self.mathematics),
            ("natural_science", self.natural_science),
            ("math_and_science", self.math_and_science),
            ("engineering_science", self.engineering_science),
            ("engineering_design", self.engineering_design),
            ("eng_sci_and_design", self.eng_sci_and_design),
            ("complementary_studies", self.complementary_studies),
        ]
    }
}

impl Validate for AccreditationUnits {
    fn validate(&self) -> Result<()> {
        for (field, value) in self.fields() {
            if !value.is_finite() || value < 0.0 {
                return Err(AuditError::invalid_course(
                    field,
                    value,
                    "accreditation units must be finite and non-negative",
                ));
            }
        }
        Ok(())
    }
}

impl Add for AccreditationUnits {
    type Output = AccreditationUnits;

    fn add(mut self, rhs: AccreditationUnits) -> AccreditationUnits {
        self += rhs;
        self
    }
}

impl AddAssign for AccreditationUnits {
    fn add_assign(&mut self, rhs: AccreditationUnits) {
        self.total += rhs.total;
        self.mathematics += rhs.mathematics;
        self.natural_science += rhs.natural_science;
        self.math_and_science += rhs.math_and_science;
        self.engineering_science += rhs.engineering_science;
        self.engineering_design += rhs.engineering_design;
        self.eng_sci_and_design += rhs.eng_sci_and_design;
        self.complementary_studies += rhs.complementary_studies;
    }
}

impl<'a> Sum<&'a AccreditationUnits> for AccreditationUnits {
    fn sum<I: Iterator<Item = &'a AccreditationUnits>>(iter: I) -> Self {
        iter.fold(AccreditationUnits::default(), |acc, units| acc + *units)
    }
}

/// 一門已選課程及其認證相關標記
///
/// 建立後不可修改；同一課程代碼可重複出現 (例如重修)，每筆都會被計算。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CourseRow", into = "CourseRow")]
pub struct CourseRecord {
    code: String,
    credits: Decimal,
    area: Option<BreadthArea>,
    accreditation_units: AccreditationUnits,
    kernel: bool,
    technical_elective: bool,
    free_elective: bool,
}

impl CourseRecord {
    pub fn builder(code: impl Into<String>, credits: impl Into<Decimal>) -> CourseRecordBuilder {
        CourseRecordBuilder {
            code: code.into(),
            credits: credits.into(),
            area: None,
            accreditation_units: AccreditationUnits::default(),
            kernel: false,
            technical_elective: false,
            free_elective: false,
        }
    }

    pub fn new(code: impl Into<String>, credits: impl Into<Decimal>) -> Result<Self> {
        Self::builder(code, credits).build()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn credits(&self) -> Decimal {
        self.credits
    }

    /// `None` 表示未分類，不參與領域分組規則
    pub fn area(&self) -> Option<BreadthArea> {
        self.area
    }

    pub fn accreditation_units(&self) -> &AccreditationUnits {
        &self.accreditation_units
    }

    pub fn is_kernel(&self) -> bool {
        self.kernel
    }

    pub fn is_technical_elective(&self) -> bool {
        self.technical_elective
    }

    pub fn is_free_elective(&self) -> bool {
        self.free_elective
    }
}

impl fmt::Display for CourseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} credits", self.code, self.credits)?;
        if let Some(area) = self.area {
            write!(f, ", {}", area)?;
        }
        if self.kernel {
            write!(f, ", kernel")?;
        }
        write!(f, ")")
    }
}

#[derive(Debug, Clone)]
pub struct CourseRecordBuilder {
    code: String,
    credits: Decimal,
    area: Option<u8>,
    accreditation_units: AccreditationUnits,
    kernel: bool,
    technical_elective: bool,
    free_elective: bool,
}

impl CourseRecordBuilder {
    pub fn area(mut self, area: u8) -> Self {
        self.area = Some(area);
        self
    }

    pub fn kernel(mut self, kernel: bool) -> Self {
        self.kernel = kernel;
        self
    }

    pub fn technical_elective(mut self, technical_elective: bool) -> Self {
        self.technical_elective = technical_elective;
        self
    }

    pub fn free_elective(mut self, free_elective: bool) -> Self {
        self.free_elective = free_elective;
        self
    }

    pub fn accreditation_units(mut self, units: AccreditationUnits) -> Self {
        self.accreditation_units = units;
        self
    }

    pub fn build(self) -> Result<CourseRecord> {
        if self.credits.is_sign_negative() && !self.credits.is_zero() {
            return Err(AuditError::invalid_course(
                "credits",
                self.credits,
                format!("course {} has negative credits", self.code),
            ));
        }
        let area = self.area.map(BreadthArea::new).transpose()?;
        self.accreditation_units.validate()?;

        Ok(CourseRecord {
            code: self.code,
            credits: self.credits,
            area,
            accreditation_units: self.accreditation_units,
            kernel: self.kernel,
            technical_elective: self.technical_elective,
            free_elective: self.free_elective,
        })
    }
}

/// 課程資料的扁平列格式 (CSV 與 JSON 共用)
///
/// 欄位別名對應原始課程資料表的欄位名稱。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseRow {
    #[serde(alias = "Course Code", alias = "code")]
    pub course_code: String,
    #[serde(alias = "num_credits")]
    pub credits: Decimal,
    #[serde(default)]
    pub area: Option<u8>,
    #[serde(default, alias = "kernel_course")]
    pub kernel: Option<bool>,
    #[serde(default)]
    pub technical_elective: Option<bool>,
    #[serde(default)]
    pub free_elective: Option<bool>,
    #[serde(default, alias = "total_AU")]
    pub total_au: Option<f64>,
    #[serde(default)]
    pub mathematics: Option<f64>,
    #[serde(default)]
    pub natural_science: Option<f64>,
    #[serde(default)]
    pub math_and_science: Option<f64>,
    #[serde(default)]
    pub engineering_science: Option<f64>,
    #[serde(default)]
    pub engineering_design: Option<f64>,
    #[serde(default)]
    pub eng_sci_and_design: Option<f64>,
    #[serde(default)]
    pub complementary_studies: Option<f64>,
}

impl TryFrom<CourseRow> for CourseRecord {
    type Error = AuditError;

    fn try_from(row: CourseRow) -> Result<Self> {
        let units = AccreditationUnits {
            total: row.total_au.unwrap_or_default(),
            mathematics: row.mathematics.unwrap_or_default(),
            natural_science: row.natural_science.unwrap_or_default(),
            math_and_science: row.math_and_science.unwrap_or_default(),
            engineering_science: row.engineering_science.unwrap_or_default(),
            engineering_design: row.engineering_design.unwrap_or_default(),
            eng_sci_and_design: row.eng_sci_and_design.unwrap_or_default(),
            complementary_studies: row.complementary_studies.unwrap_or_default(),
        };

        let mut builder = CourseRecord::builder(row.course_code, row.credits)
            .kernel(row.kernel.unwrap_or(false))
            .technical_elective(row.technical_elective.unwrap_or(false))
            .free_elective(row.free_elective.unwrap_or(false))
            .accreditation_units(units);
        if let Some(area) = row.area {
            builder = builder.area(area);
        }
        builder.build()
    }
}

impl From<CourseRecord> for CourseRow {
    fn from(record: CourseRecord) -> Self {
        let units = record.accreditation_units;
        CourseRow {
            course_code: record.code,
            credits: record.credits,
            area: record.area.map(u8::from),
            kernel: Some(record.kernel),
            technical_elective: Some(record.technical_elective),
            free_elective: Some(record.free_elective),
            total_au: Some(units.total),
            mathematics: Some(units.mathematics),
            natural_science: Some(units.natural_science),
            math_and_science: Some(units.math_and_science),
            engineering_science: Some(units.engineering_science),
            engineering_design: Some(units.engineering_design),
            eng_sci_and_design: Some(units.eng_sci_and_design),
            complementary_studies: Some(units.complementary_studies),
        }
    }
}
