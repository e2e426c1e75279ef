use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "course-audit")]
#[command(about = "Check a course plan against degree accreditation constraints")]
pub struct CliArgs {
    /// Path to the constraint file (.toml or .json)
    #[arg(short, long, default_value = "constraints.toml")]
    pub constraints: String,

    /// Path to the course list (.csv or .json)
    #[arg(long)]
    pub courses: String,

    /// Report format written to stdout
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliArgs {
    fn validate(&self) -> Result<()> {
        validation::validate_path("constraints", &self.constraints)?;
        validation::validate_file_extension("constraints", &self.constraints, &["toml", "json"])?;
        validation::validate_path("courses", &self.courses)?;
        validation::validate_file_extension("courses", &self.courses, &["csv", "json"])?;
        Ok(())
    }
}
