use clap::Parser;
use course_audit::adapters::course_source_for_path;
use course_audit::utils::error::ErrorSeverity;
use course_audit::utils::{logger, validation::Validate};
use course_audit::{AuditEngine, AuditOutcome, CliArgs, ConstraintFile, ConstraintVerifier, OutputFormat};

/// 有規則未通過時的結束碼
const EXIT_RULES_FAILED: i32 = 4;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting course-audit");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    // 驗證參數
    if let Err(e) = args.validate() {
        tracing::error!("❌ Argument validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let outcome = match audit(&args) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(
                "❌ Audit failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    };

    match args.format {
        OutputFormat::Text => print_summary(&outcome),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }

    if !outcome.report.overall_passed() {
        std::process::exit(EXIT_RULES_FAILED);
    }

    Ok(())
}

fn audit(args: &CliArgs) -> course_audit::Result<AuditOutcome> {
    let verifier = ConstraintVerifier::from_source(&ConstraintFile::new(&args.constraints))?;
    tracing::info!("✅ Constraints loaded from {}", args.constraints);

    let source = course_source_for_path(&args.courses)?;
    AuditEngine::new(source, verifier).run()
}

fn print_summary(outcome: &AuditOutcome) {
    let units = &outcome.accreditation_units;

    let credits = outcome
        .total_credits
        .map(|total| total.normalize().to_string())
        .unwrap_or_else(|| "overflowed".to_string());

    println!("📋 {} ({} courses, {} credits)", outcome.source, outcome.course_count, credits);
    println!(
        "   AU total {:.1} | math {:.1} | natural science {:.1} | eng science {:.1} | eng design {:.1} | complementary {:.1}",
        units.total,
        units.mathematics,
        units.natural_science,
        units.engineering_science,
        units.engineering_design,
        units.complementary_studies
    );
    println!("{}", outcome.report);
}
