use crate::cli::JitterArgs;
use crate::infra::assessment_service;
use chrono::Utc;
use clap::Args;
use health_risk::assessment::{
    AlcoholConsumption, AssessmentReport, AssessmentServiceError, Condition, FamilyHistory, Gender,
    HealthProfile, JitterSource, PhysicalActivity, ProfileBatch, ProfileImporter,
    ProfileSubmission, RiskAssessmentService, SmokingStatus,
};
use health_risk::config::AppConfig;
use health_risk::error::AppError;
use health_risk::telemetry;
use std::path::PathBuf;
use tracing::warn;

const DISCLAIMER: &str = "This is a health risk estimate, not a medical diagnosis. \
Different models may disagree; the average gives a balanced estimate. \
Consult a healthcare professional for personalized advice.";

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Age in years
    #[arg(long, default_value_t = 30, allow_negative_numbers = true)]
    pub(crate) age: i32,
    /// male, female or other
    #[arg(long, default_value = "male")]
    pub(crate) gender: Gender,
    /// Body mass index
    #[arg(long, default_value_t = 25.0)]
    pub(crate) bmi: f64,
    /// Systolic blood pressure (mmHg)
    #[arg(long, default_value_t = 120)]
    pub(crate) systolic: i32,
    /// Diastolic blood pressure (mmHg)
    #[arg(long, default_value_t = 80)]
    pub(crate) diastolic: i32,
    /// Total cholesterol (mg/dL)
    #[arg(long, default_value_t = 200)]
    pub(crate) cholesterol: i32,
    /// Fasting glucose (mg/dL)
    #[arg(long, default_value_t = 100)]
    pub(crate) glucose: i32,
    /// no, former, occasional or regular
    #[arg(long, default_value = "no")]
    pub(crate) smoking_status: SmokingStatus,
    /// none, light, moderate or heavy
    #[arg(long, default_value = "moderate")]
    pub(crate) alcohol: AlcoholConsumption,
    /// sedentary, light, moderate or vigorous
    #[arg(long, default_value = "moderate")]
    pub(crate) activity: PhysicalActivity,
    /// no, diabetes, hypertension, heart or multiple
    #[arg(long, default_value = "no")]
    pub(crate) family_history: FamilyHistory,
    /// Score a single condition instead of all three
    #[arg(long)]
    pub(crate) condition: Option<Condition>,
    /// Include the factor breakdown for each condition
    #[arg(long)]
    pub(crate) explain: bool,
    /// Print the report as JSON
    #[arg(long)]
    pub(crate) json: bool,
    #[command(flatten)]
    pub(crate) jitter: JitterArgs,
}

impl AssessArgs {
    fn profile(&self) -> HealthProfile {
        HealthProfile {
            age: self.age,
            gender: self.gender,
            bmi: self.bmi,
            blood_pressure_systolic: self.systolic,
            blood_pressure_diastolic: self.diastolic,
            cholesterol_level: self.cholesterol,
            glucose_level: self.glucose,
            smoking_status: self.smoking_status,
            alcohol_consumption: self.alcohol,
            physical_activity: self.activity,
            family_history: self.family_history,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export with camelCase profile headers
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print one JSON report per line instead of a summary table
    #[arg(long)]
    pub(crate) json: bool,
    #[command(flatten)]
    pub(crate) jitter: JitterArgs,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_for_cli(&config.telemetry)?;

    let service = assessment_service(config.scoring, args.jitter);
    let profile = args.profile();
    let submission = ProfileSubmission::from(profile.clone());

    let result = match args.condition {
        Some(condition) => service.assess_condition(submission, condition),
        None => service.assess(submission),
    };
    let report = result.map_err(|AssessmentServiceError::Validation(err)| AppError::from(err))?;

    if args.json {
        print_json(&report);
    } else {
        render_assessment(&profile, &report, args.explain);
    }

    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_for_cli(&config.telemetry)?;

    let service = assessment_service(config.scoring, args.jitter);
    let batch = ProfileImporter::from_path(&args.csv)?;

    if !args.json {
        println!("Batch assessment of {} ({} rows)", args.csv.display(), batch.len());
    }

    let outcome = score_batch(&service, batch);
    for (row, result) in &outcome.rows {
        match result {
            Ok(report) if args.json => print_json(report),
            Ok(report) => println!("- row {row}: {}", summary_line(report)),
            Err(reason) if !args.json => println!("- row {row}: rejected ({reason})"),
            Err(_) => {}
        }
    }

    let rejected = outcome.rejected();
    if rejected > 0 {
        warn!(rejected, "batch finished with rejected rows");
        if !args.json {
            println!("{rejected} row(s) rejected");
        }
    }

    Ok(())
}

/// Per-row results in file order; a row is either a report or the reason it
/// was rejected.
struct BatchOutcome {
    rows: Vec<(usize, Result<AssessmentReport, String>)>,
}

impl BatchOutcome {
    fn rejected(&self) -> usize {
        self.rows.iter().filter(|(_, result)| result.is_err()).count()
    }
}

fn score_batch<J>(service: &RiskAssessmentService<J>, batch: ProfileBatch) -> BatchOutcome
where
    J: JitterSource + 'static,
{
    let mut rows: Vec<(usize, Result<AssessmentReport, String>)> = batch
        .rejected
        .into_iter()
        .map(|rejected| (rejected.row, Err(rejected.reason)))
        .collect();

    for profile in batch.profiles {
        let result = match service.assess(profile.submission) {
            Ok(report) => Ok(report),
            Err(AssessmentServiceError::Validation(err)) => {
                warn!(row = profile.row, field = err.field(), "skipping incomplete profile");
                Err(err.to_string())
            }
        };
        rows.push((profile.row, result));
    }

    rows.sort_by_key(|(row, _)| *row);
    BatchOutcome { rows }
}

fn print_json(report: &AssessmentReport) {
    match serde_json::to_string(report) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("report payload unavailable: {err}"),
    }
}

fn summary_line(report: &AssessmentReport) -> String {
    report
        .summaries
        .iter()
        .map(|summary| {
            format!(
                "{} {:.1}% ({})",
                summary.label, summary.average_risk, summary.risk_level_label
            )
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

fn render_assessment(profile: &HealthProfile, report: &AssessmentReport, explain: bool) {
    println!("Health risk assessment ({})", Utc::now().format("%Y-%m-%d %H:%M UTC"));
    println!(
        "Profile: age {}, {}, bmi {:.1}, blood pressure {}/{}, cholesterol {}, glucose {}",
        profile.age,
        profile.gender.as_str(),
        profile.bmi,
        profile.blood_pressure_systolic,
        profile.blood_pressure_diastolic,
        profile.cholesterol_level,
        profile.glucose_level
    );
    println!(
        "Lifestyle: smoking {}, alcohol {}, activity {}, family history {}",
        profile.smoking_status.as_str(),
        profile.alcohol_consumption.as_str(),
        profile.physical_activity.as_str(),
        profile.family_history.as_str()
    );

    for summary in &report.summaries {
        println!(
            "\n{}: {:.1}% average ({})",
            summary.label, summary.average_risk, summary.risk_level_label
        );
        for view in &summary.model_scores {
            println!("- {}: {:.1}%", view.label, view.value);
        }

        if explain {
            if let Some(breakdown) = &summary.factors {
                println!("  Base risk {:.2} from:", breakdown.base_risk);
                for contribution in &breakdown.contributions {
                    println!("    - {} ({:+.2})", contribution.notes, contribution.weight);
                }
            }
        }
    }

    if !report.advisories.is_empty() {
        println!("\nAdvisories");
        for advisory in &report.advisories {
            println!("- {advisory}");
        }
    }

    println!("\n{DISCLAIMER}");
}
