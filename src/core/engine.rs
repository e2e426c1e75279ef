use crate::core::report::VerificationReport;
use crate::core::verifier::{self, ConstraintVerifier};
use crate::domain::model::AccreditationUnits;
use crate::domain::ports::CourseSource;
use crate::utils::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;

/// 一次稽核的結果：規則報告加上課程清單的摘要
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditOutcome {
    pub source: String,
    pub course_count: usize,
    /// `None` 表示學分總和溢位
    pub total_credits: Option<Decimal>,
    pub accreditation_units: AccreditationUnits,
    pub report: VerificationReport,
}

pub struct AuditEngine<S: CourseSource> {
    source: S,
    verifier: ConstraintVerifier,
}

impl<S: CourseSource> AuditEngine<S> {
    pub fn new(source: S, verifier: ConstraintVerifier) -> Self {
        Self { source, verifier }
    }

    pub fn verifier(&self) -> &ConstraintVerifier {
        &self.verifier
    }

    pub fn run(&self) -> Result<AuditOutcome> {
        let source = self.source.describe();
        tracing::info!("📥 Loading courses from {}", source);
        let courses = self.source.load_courses()?;
        tracing::info!("📚 Loaded {} courses", courses.len());

        let report = self.verifier.verify(&courses);

        for rule in report.failed_rules() {
            tracing::warn!("❌ FAILED: {}", rule.label());
        }
        if report.overall_passed() {
            tracing::info!("✔ All constraints satisfied");
        }

        Ok(AuditOutcome {
            source,
            course_count: courses.len(),
            total_credits: verifier::total_credits(&courses),
            accreditation_units: courses.iter().map(|course| course.accreditation_units()).sum(),
            report,
        })
    }
}
