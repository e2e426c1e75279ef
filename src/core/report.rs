use serde::{Deserialize, Serialize};
use std::fmt;

/// 驗證規則，順序即為報告中的順序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    TotalCredits,
    CapstoneCourse,
    KernelBreadth,
    Depth,
}

impl Rule {
    pub const ALL: [Rule; 4] = [
        Rule::TotalCredits,
        Rule::CapstoneCourse,
        Rule::KernelBreadth,
        Rule::Depth,
    ];

    /// 穩定的機器可讀名稱
    pub fn name(self) -> &'static str {
        match self {
            Rule::TotalCredits => "total_credits",
            Rule::CapstoneCourse => "capstone_course",
            Rule::KernelBreadth => "kernel_breadth",
            Rule::Depth => "depth",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rule::TotalCredits => "Total Credits Requirement",
            Rule::CapstoneCourse => "Capstone Course Required",
            Rule::KernelBreadth => "Kernel Requirement",
            Rule::Depth => "Depth Requirement",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub rule: Rule,
    pub passed: bool,
    pub detail: String,
}

impl RuleOutcome {
    pub fn new(rule: Rule, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            rule,
            passed,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    outcomes: Vec<RuleOutcome>,
    overall_passed: bool,
}

impl VerificationReport {
    pub fn from_outcomes(outcomes: Vec<RuleOutcome>) -> Self {
        let overall_passed = outcomes.iter().all(|outcome| outcome.passed);
        Self {
            outcomes,
            overall_passed,
        }
    }

    pub fn outcomes(&self) -> &[RuleOutcome] {
        &self.outcomes
    }

    pub fn overall_passed(&self) -> bool {
        self.overall_passed
    }

    pub fn outcome(&self, rule: Rule) -> Option<&RuleOutcome> {
        self.outcomes.iter().find(|outcome| outcome.rule == rule)
    }

    pub fn passed(&self, rule: Rule) -> bool {
        self.outcome(rule).map(|outcome| outcome.passed).unwrap_or(false)
    }

    pub fn failed_rules(&self) -> impl Iterator<Item = Rule> + '_ {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.passed)
            .map(|outcome| outcome.rule)
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            let mark = if outcome.passed { "✔" } else { "❌ FAILED:" };
            writeln!(f, "{} {} ({})", mark, outcome.rule.label(), outcome.detail)?;
        }

        if self.overall_passed {
            write!(f, "✔ All constraints satisfied!")
        } else {
            let failed: Vec<&str> = self.failed_rules().map(Rule::name).collect();
            write!(f, "❌ Failed rules: {}", failed.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overall_is_and_of_outcomes() {
        let report = VerificationReport::from_outcomes(vec![
            RuleOutcome::new(Rule::TotalCredits, true, "20 of 20"),
            RuleOutcome::new(Rule::CapstoneCourse, false, "ECE472 missing"),
        ]);

        assert!(!report.overall_passed());
        assert!(report.passed(Rule::TotalCredits));
        assert!(!report.passed(Rule::CapstoneCourse));
        assert!(!report.passed(Rule::Depth));
        assert_eq!(report.failed_rules().collect::<Vec<_>>(), vec![Rule::CapstoneCourse]);
    }

    #[test]
    fn test_display_enumerates_failures() {
        let report = VerificationReport::from_outcomes(vec![
            RuleOutcome::new(Rule::KernelBreadth, false, "2 areas"),
            RuleOutcome::new(Rule::Depth, false, "0 areas"),
        ]);

        let text = report.to_string();
        assert!(text.contains("❌ FAILED: Kernel Requirement (2 areas)"));
        assert!(text.ends_with("Failed rules: kernel_breadth, depth"));
    }

    #[test]
    fn test_serialized_rule_names_are_stable() {
        let report = VerificationReport::from_outcomes(vec![RuleOutcome::new(
            Rule::CapstoneCourse,
            true,
            "",
        )]);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["outcomes"][0]["rule"], "capstone_course");
        assert_eq!(json["overall_passed"], true);
    }
}
