use crate::config::ConstraintSpec;
use crate::core::report::{Rule, RuleOutcome, VerificationReport};
use crate::domain::model::{BreadthArea, CourseRecord};
use crate::domain::ports::ConstraintSource;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

/// 核心課程必須涵蓋的最少相異領域數 (固定政策門檻)
pub const KERNEL_BREADTH_MIN: usize = 4;

/// 深度領域的最少課程數，包含該領域的核心課程本身
pub const DEPTH_MIN_GROUP_SIZE: usize = 3;

/// 無狀態的約束驗證器
///
/// 只持有已解析的 [`ConstraintSpec`]；`verify` 不修改輸入，也不會因為規則未通過而回傳錯誤。
#[derive(Debug, Clone)]
pub struct ConstraintVerifier {
    spec: ConstraintSpec,
}

impl ConstraintVerifier {
    pub fn new(spec: ConstraintSpec) -> Result<Self> {
        spec.validate()?;

        if let Some(min_kernel) = spec.min_kernel_requirement {
            if min_kernel as usize != KERNEL_BREADTH_MIN {
                tracing::warn!(
                    "min_kernel_requirement = {} is ignored; kernel breadth uses the fixed minimum of {}",
                    min_kernel,
                    KERNEL_BREADTH_MIN
                );
            }
        }

        Ok(Self { spec })
    }

    pub fn from_source(source: &dyn ConstraintSource) -> Result<Self> {
        tracing::debug!("Loading constraints from {}", source.describe());
        Self::new(source.load_constraints()?)
    }

    pub fn spec(&self) -> &ConstraintSpec {
        &self.spec
    }

    /// 執行全部規則，不會因為前面的規則失敗而提早結束
    pub fn verify(&self, courses: &[CourseRecord]) -> VerificationReport {
        let outcomes = vec![
            self.check_total_credits(courses),
            self.check_capstone(courses),
            self.check_kernel_breadth(courses),
            self.check_depth(courses),
        ];

        for outcome in outcomes.iter().filter(|outcome| !outcome.passed) {
            tracing::debug!("Rule {} failed: {}", outcome.rule, outcome.detail);
        }

        VerificationReport::from_outcomes(outcomes)
    }

    pub fn check_total_credits(&self, courses: &[CourseRecord]) -> RuleOutcome {
        let required = self.spec.total_num_credits;

        match total_credits(courses) {
            Some(total) => RuleOutcome::new(
                Rule::TotalCredits,
                total == required,
                format!("{} of {} credits", total.normalize(), required.normalize()),
            ),
            None => RuleOutcome::new(
                Rule::TotalCredits,
                false,
                format!("credit total overflowed; {} required", required.normalize()),
            ),
        }
    }

    pub fn check_capstone(&self, courses: &[CourseRecord]) -> RuleOutcome {
        let code = &self.spec.capstone_code;

        if !self.spec.capstone_required {
            return RuleOutcome::new(Rule::CapstoneCourse, true, format!("{} not required", code));
        }

        let found = courses.iter().any(|course| course.code() == code);
        let detail = if found {
            format!("{} present", code)
        } else {
            format!("{} missing", code)
        };
        RuleOutcome::new(Rule::CapstoneCourse, found, detail)
    }

    pub fn check_kernel_breadth(&self, courses: &[CourseRecord]) -> RuleOutcome {
        let areas = kernel_areas(courses);

        RuleOutcome::new(
            Rule::KernelBreadth,
            areas.len() >= KERNEL_BREADTH_MIN,
            format!(
                "kernel courses in {} of {} required areas{}",
                areas.len(),
                KERNEL_BREADTH_MIN,
                format_areas(areas.iter().copied())
            ),
        )
    }

    pub fn check_depth(&self, courses: &[CourseRecord]) -> RuleOutcome {
        let areas = depth_areas(courses);
        let required = self.spec.min_depth_requirement as usize;

        RuleOutcome::new(
            Rule::Depth,
            areas.len() >= required,
            format!(
                "{} of {} required depth areas{}",
                areas.len(),
                required,
                format_areas(areas.iter().copied())
            ),
        )
    }
}

/// 學分總和；超出 Decimal 範圍時回傳 `None`
pub fn total_credits(courses: &[CourseRecord]) -> Option<Decimal> {
    courses
        .iter()
        .try_fold(Decimal::ZERO, |acc, course| acc.checked_add(course.credits()))
}

/// 有核心課程的相異領域；未分類的課程不計入
pub fn kernel_areas(courses: &[CourseRecord]) -> BTreeSet<BreadthArea> {
    courses
        .iter()
        .filter(|course| course.is_kernel())
        .filter_map(CourseRecord::area)
        .collect()
}

/// 符合深度條件的領域：至少一門核心課程，且該領域總課程數 >= DEPTH_MIN_GROUP_SIZE
pub fn depth_areas(courses: &[CourseRecord]) -> Vec<BreadthArea> {
    let mut groups: BTreeMap<BreadthArea, (usize, bool)> = BTreeMap::new();

    for course in courses {
        if let Some(area) = course.area() {
            let group = groups.entry(area).or_insert((0, false));
            group.0 += 1;
            group.1 |= course.is_kernel();
        }
    }

    groups
        .into_iter()
        .filter(|(_, (count, has_kernel))| *has_kernel && *count >= DEPTH_MIN_GROUP_SIZE)
        .map(|(area, _)| area)
        .collect()
}

fn format_areas(areas: impl Iterator<Item = BreadthArea>) -> String {
    let numbers: Vec<String> = areas.map(|area| area.number().to_string()).collect();
    if numbers.is_empty() {
        String::new()
    } else {
        format!(": areas {}", numbers.join(", "))
    }
}
