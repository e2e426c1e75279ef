use course_audit::{ConstraintSpec, ConstraintVerifier, CourseRecord, Rule};

fn course(code: &str, credits: i64, area: Option<u8>, kernel: bool) -> CourseRecord {
    let mut builder = CourseRecord::builder(code, credits).kernel(kernel);
    if let Some(area) = area {
        builder = builder.area(area);
    }
    builder.build().unwrap()
}

fn reference_spec() -> ConstraintSpec {
    ConstraintSpec::from_toml_str(
        r#"
total_num_credits = 20
ECE472_required = true
min_depth_requirement = 2
"#,
    )
    .unwrap()
}

/// 兩個深度領域、四個核心領域與頂點課程，全部規則通過
#[test]
fn test_reference_plan_passes() {
    let courses = vec![
        course("ECE101", 2, Some(1), true),
        course("ECE102", 2, Some(1), false),
        course("ECE103", 2, Some(1), false),
        course("ECE201", 2, Some(2), true),
        course("ECE202", 2, Some(2), false),
        course("ECE203", 2, Some(2), false),
        course("ECE101", 2, Some(3), true),
        course("ECE201", 2, Some(4), true),
        course("ECE472", 4, None, false),
    ];

    let verifier = ConstraintVerifier::new(reference_spec()).unwrap();
    let report = verifier.verify(&courses);

    assert_eq!(report.outcomes().len(), 4);
    for rule in Rule::ALL {
        assert!(report.passed(rule), "{} should pass: {}", rule, report);
    }
    assert!(report.overall_passed());
}

#[test]
fn test_reference_plan_fails_breadth_and_depth() {
    let courses = vec![
        course("ECE101", 1, Some(1), true),
        course("ECE102", 1, Some(1), false),
        course("ECE201", 1, Some(2), true),
        course("ECE472", 1, None, false),
    ];

    let verifier = ConstraintVerifier::new(reference_spec()).unwrap();
    let report = verifier.verify(&courses);

    assert_eq!(report.outcomes().len(), 4);
    assert!(report.passed(Rule::CapstoneCourse));
    assert!(!report.passed(Rule::KernelBreadth));
    assert!(!report.passed(Rule::Depth));
    // 4 credits against a required 20
    assert!(!report.passed(Rule::TotalCredits));
    assert!(!report.overall_passed());

    let failed: Vec<Rule> = report.failed_rules().collect();
    assert_eq!(failed, vec![Rule::TotalCredits, Rule::KernelBreadth, Rule::Depth]);
}

#[test]
fn test_failed_total_does_not_short_circuit() {
    let courses = vec![
        course("ECE101", 1, Some(1), true),
        course("ECE102", 1, Some(1), false),
        course("ECE103", 1, Some(1), false),
        course("ECE201", 1, Some(2), true),
        course("ECE202", 1, Some(2), false),
        course("ECE203", 1, Some(2), false),
        course("ECE301", 1, Some(3), true),
        course("ECE401", 1, Some(4), true),
        course("ECE472", 1, None, false),
    ];

    let report = ConstraintVerifier::new(reference_spec())
        .unwrap()
        .verify(&courses);

    assert!(!report.passed(Rule::TotalCredits));
    assert!(report.passed(Rule::CapstoneCourse));
    assert!(report.passed(Rule::KernelBreadth));
    assert!(report.passed(Rule::Depth));
    assert_eq!(report.failed_rules().collect::<Vec<_>>(), vec![Rule::TotalCredits]);
}

#[test]
fn test_report_serializes_for_callers() {
    let report = ConstraintVerifier::new(reference_spec())
        .unwrap()
        .verify(&[]);
    let json = serde_json::to_value(&report).unwrap();

    let names: Vec<&str> = json["outcomes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|outcome| outcome["rule"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["total_credits", "capstone_course", "kernel_breadth", "depth"]);
    assert_eq!(json["overall_passed"], false);
}
