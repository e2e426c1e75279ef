use anyhow::Result;
use course_audit::adapters::course_source_for_path;
use course_audit::{
    AuditEngine, AuditError, ConstraintFile, ConstraintVerifier, CsvCourseSource, Rule,
};
use rust_decimal::Decimal;
use tempfile::TempDir;

const PASSING_PLAN_CSV: &str = "\
course_code,credits,area,kernel,technical_elective,free_elective,total_au,mathematics,engineering_design
ECE101,2,1,true,false,false,40,10,5
ECE102,2,1,false,false,false,40,,
ECE103,2,1,false,true,false,40,,
ECE201,2,2,true,false,false,40,,10
ECE202,2,2,false,false,false,40,,
ECE203,2,2,false,false,true,40,,
ECE101,2,3,true,false,false,40,,
ECE201,2,4,true,false,false,40,,
ECE472,4,,false,false,false,80,,40
";

#[test]
fn test_audit_from_toml_and_csv() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let constraints_path = temp_dir.path().join("constraints.toml");
    let courses_path = temp_dir.path().join("plan.csv");

    std::fs::write(
        &constraints_path,
        "total_num_credits = 20\nECE472_required = true\nmin_kernel_requirement = 4\nmin_depth_requirement = 2\n",
    )?;
    std::fs::write(&courses_path, PASSING_PLAN_CSV)?;

    let verifier = ConstraintVerifier::from_source(&ConstraintFile::new(&constraints_path))?;
    let engine = AuditEngine::new(CsvCourseSource::new(&courses_path), verifier);
    let outcome = engine.run()?;

    assert_eq!(outcome.course_count, 9);
    assert_eq!(outcome.total_credits, Some(Decimal::from(20)));
    assert_eq!(outcome.accreditation_units.total, 400.0);
    assert_eq!(outcome.accreditation_units.engineering_design, 55.0);
    assert!(outcome.report.overall_passed());
    Ok(())
}

#[test]
fn test_audit_from_json_files() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let constraints_path = temp_dir.path().join("constraints.json");
    let courses_path = temp_dir.path().join("plan.json");

    std::fs::write(
        &constraints_path,
        r#"{"total_num_credits": 4, "ECE472_required": true, "min_kernel_requirement": 4, "min_depth_requirement": 2}"#,
    )?;
    std::fs::write(
        &courses_path,
        r#"[
            {"course_code": "ECE101", "credits": 1, "area": 1, "kernel": true},
            {"course_code": "ECE102", "credits": 1, "area": 1},
            {"course_code": "ECE201", "credits": 1, "area": 2, "kernel": true},
            {"course_code": "ECE472", "credits": 1}
        ]"#,
    )?;

    let verifier = ConstraintVerifier::from_source(&ConstraintFile::new(&constraints_path))?;
    let engine = AuditEngine::new(course_source_for_path(&courses_path)?, verifier);
    let outcome = engine.run()?;

    assert!(outcome.report.passed(Rule::TotalCredits));
    assert!(outcome.report.passed(Rule::CapstoneCourse));
    assert!(!outcome.report.passed(Rule::KernelBreadth));
    assert!(!outcome.report.passed(Rule::Depth));
    assert!(!outcome.report.overall_passed());
    Ok(())
}

#[test]
fn test_missing_constraint_file_prevents_verifier() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("constraints.toml");

    let err = ConstraintVerifier::from_source(&ConstraintFile::new(&missing)).unwrap_err();
    assert!(matches!(err, AuditError::ConfigNotFoundError { .. }));
}

#[test]
fn test_malformed_constraint_file_prevents_verifier() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("constraints.toml");
    std::fs::write(&path, "total_num_credits = \"twenty\"\nECE472_required = true\n").unwrap();

    let err = ConstraintVerifier::from_source(&ConstraintFile::new(&path)).unwrap_err();
    assert!(matches!(err, AuditError::ConfigParseError { .. }));
}

#[test]
fn test_invalid_course_row_stops_audit() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let courses_path = temp_dir.path().join("plan.csv");
    std::fs::write(&courses_path, "course_code,credits,area\nECE101,-2,1\n")?;

    let verifier = ConstraintVerifier::new(course_audit::ConstraintSpec::new(20, true, 2))?;
    let engine = AuditEngine::new(CsvCourseSource::new(&courses_path), verifier);

    let err = engine.run().unwrap_err();
    assert!(matches!(err, AuditError::DomainValidationError { .. }));
    Ok(())
}
