use crate::domain::model::AREA_COUNT;
use crate::domain::ports::ConstraintSource;
use crate::utils::error::{AuditError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_CAPSTONE_CODE: &str = "ECE472";

/// 學位認證約束設定
///
/// 鍵名沿用原本的 `constraints.json` 格式，因此頂點課程旗標的鍵為 `ECE472_required`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintSpec {
    /// 必須剛好等於的學分總數；只接受數字，不接受字串
    #[serde(with = "credit_number")]
    pub total_num_credits: Decimal,

    #[serde(rename = "ECE472_required", alias = "capstone_required")]
    pub capstone_required: bool,

    #[serde(default = "default_capstone_code")]
    pub capstone_code: String,

    /// 保留在設定格式中，可省略且不檢查範圍；核心廣度規則使用固定門檻，不讀取此值
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_kernel_requirement: Option<u32>,

    pub min_depth_requirement: u32,
}

fn default_capstone_code() -> String {
    DEFAULT_CAPSTONE_CODE.to_string()
}

/// 學分數以 TOML/JSON 數字表示，字串值視為格式錯誤
mod credit_number {
    use super::*;
    use rust_decimal::prelude::ToPrimitive;
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match value.to_i64() {
            Some(whole) if value.fract().is_zero() => serializer.serialize_i64(whole),
            _ => match value.to_f64() {
                Some(float) => serializer.serialize_f64(float),
                None => Err(serde::ser::Error::custom(format!("credit value {} is not representable", value))),
            },
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Decimal, D::Error> {
        deserializer.deserialize_any(CreditNumberVisitor)
    }

    struct CreditNumberVisitor;

    impl<'de> Visitor<'de> for CreditNumberVisitor {
        type Value = Decimal;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number of credits")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<Decimal, E> {
            Ok(Decimal::from(value))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Decimal, E> {
            Ok(Decimal::from(value))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> std::result::Result<Decimal, E> {
            Decimal::from_str(&value.to_string())
                .map_err(|_| E::invalid_value(de::Unexpected::Float(value), &self))
        }
    }
}

impl ConstraintSpec {
    pub fn new(total_num_credits: impl Into<Decimal>, capstone_required: bool, min_depth_requirement: u32) -> Self {
        Self {
            total_num_credits: total_num_credits.into(),
            capstone_required,
            capstone_code: default_capstone_code(),
            min_kernel_requirement: None,
            min_depth_requirement,
        }
    }

    pub fn with_capstone_code(mut self, code: impl Into<String>) -> Self {
        self.capstone_code = code.into();
        self
    }

    pub fn with_min_kernel_requirement(mut self, min_kernel: u32) -> Self {
        self.min_kernel_requirement = Some(min_kernel);
        self
    }

    /// 從檔案載入，依副檔名選擇 TOML 或 JSON
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source_name = path.display().to_string();

        validation::validate_path("constraints", &source_name)?;
        validation::validate_file_extension("constraints", &source_name, &["toml", "json"])?;

        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AuditError::ConfigNotFoundError {
                path: source_name.clone(),
            },
            _ => AuditError::IoError(e),
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&content, &source_name),
            _ => Self::parse_toml(&content, &source_name),
        }
    }

    /// 從 TOML 字串解析設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::parse_toml(content, "<inline toml>")
    }

    /// 從 JSON 字串解析設定
    pub fn from_json_str(content: &str) -> Result<Self> {
        Self::parse_json(content, "<inline json>")
    }

    fn parse_toml(content: &str, source_name: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AuditError::ConfigParseError {
            source_name: source_name.to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    fn parse_json(content: &str, source_name: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| AuditError::ConfigParseError {
            source_name: source_name.to_string(),
            message: format!("JSON parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TOTAL_CREDITS})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AuditError::ConfigParseError {
            source_name: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for ConstraintSpec {
    fn validate(&self) -> Result<()> {
        validation::validate_non_negative("total_num_credits", self.total_num_credits)?;
        validation::validate_range("min_depth_requirement", self.min_depth_requirement, 0, u32::from(AREA_COUNT))?;
        validation::validate_non_empty_string("capstone_code", &self.capstone_code)?;
        Ok(())
    }
}

impl ConstraintSource for ConstraintSpec {
    fn load_constraints(&self) -> Result<ConstraintSpec> {
        self.validate()?;
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        "in-memory constraints".to_string()
    }
}

/// 磁碟上的約束設定檔
#[derive(Debug, Clone)]
pub struct ConstraintFile {
    path: PathBuf,
}

impl ConstraintFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConstraintSource for ConstraintFile {
    fn load_constraints(&self) -> Result<ConstraintSpec> {
        tracing::debug!("Loading constraints from {}", self.path.display());
        let spec = ConstraintSpec::from_file(&self.path)?;
        spec.validate()?;
        Ok(spec)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
