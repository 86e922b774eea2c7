use std::io::Cursor;

use health_risk::assessment::{
    classify, AssessmentServiceError, Condition, FixedJitter, HealthProfile, ModelVariant,
    ProfileImporter, ProfileSubmission, RiskAssessmentService, RiskLevel, ScoringConfig,
    SeededJitter, ValidationError,
};

const CSV_EXPORT: &str = "\
age,gender,bmi,bloodPressureSystolic,bloodPressureDiastolic,cholesterolLevel,glucoseLevel,smokingStatus,alcoholConsumption,physicalActivity,familyHistory
45,female,28,135,88,230,115,occasional,moderate,light,diabetes
30,male,25,120,80,200,100,no,moderate,moderate,no
58,male,33.2,150,95,260,,regular,heavy,sedentary,multiple
";

#[test]
fn csv_batch_scores_complete_rows_and_rejects_incomplete_ones() {
    let service = RiskAssessmentService::new(ScoringConfig::standard(), FixedJitter::none());
    let rows = ProfileImporter::from_reader(Cursor::new(CSV_EXPORT)).expect("csv parses");

    assert_eq!(rows.len(), 3);
    assert!(rows.rejected.is_empty());
    let rows = rows.profiles;

    let reference = service
        .assess(rows[0].submission.clone())
        .expect("reference row scores");
    assert_eq!(
        reference.scores.get(Condition::Diabetes, ModelVariant::Xgboost),
        Some(95.0)
    );

    let baseline = service
        .assess(rows[1].submission.clone())
        .expect("baseline row scores");
    for summary in &baseline.summaries {
        assert!(summary.average_risk < 6.0, "{}", summary.average_risk);
        assert_eq!(summary.risk_level, RiskLevel::Low);
    }
    assert_eq!(
        baseline.scores.get(Condition::Hypertension, ModelVariant::DecisionTree),
        Some(5.5)
    );

    match service.assess(rows[2].submission.clone()) {
        Err(AssessmentServiceError::Validation(ValidationError::MissingField(field))) => {
            assert_eq!(field, "glucoseLevel")
        }
        other => panic!("expected missing glucose, got {other:?}"),
    }
}

#[test]
fn unreadable_csv_rows_leave_the_rest_of_the_batch_scorable() {
    let export = "\
age,gender,bmi,bloodPressureSystolic,bloodPressureDiastolic,cholesterolLevel,glucoseLevel,smokingStatus,alcoholConsumption,physicalActivity,familyHistory
45,female,28,135,88,230,115,occasional,moderate,light,diabetes
45,female,28,135,88,230,115,sometimes,moderate,light,diabetes
30,male,25,120,80,200,100,no,moderate,moderate,no
";
    let service = RiskAssessmentService::new(ScoringConfig::standard(), FixedJitter::none());

    let batch = ProfileImporter::from_reader(Cursor::new(export)).expect("csv parses");

    assert_eq!(batch.rejected.len(), 1);
    assert_eq!(batch.rejected[0].row, 2);

    let scored: Vec<usize> = batch
        .profiles
        .into_iter()
        .filter(|profile| service.assess(profile.submission.clone()).is_ok())
        .map(|profile| profile.row)
        .collect();
    assert_eq!(scored, vec![1, 3]);
}

#[test]
fn default_form_profile_is_low_risk_for_every_condition() {
    let service = RiskAssessmentService::new(ScoringConfig::standard(), FixedJitter::none());

    let report = service
        .assess(ProfileSubmission::from(HealthProfile::default()))
        .expect("default profile scores");

    for condition in Condition::ordered() {
        let summary = report.summary(condition).expect("summary present");
        assert_eq!(classify(summary.average_risk), RiskLevel::Low);
    }
}

#[test]
fn seeded_jitter_keeps_every_cell_within_bounds() {
    let service = RiskAssessmentService::new(ScoringConfig::standard(), SeededJitter::new(99));
    let submission = ProfileSubmission::from(HealthProfile {
        age: 48,
        bmi: 27.5,
        ..HealthProfile::default()
    });

    for _ in 0..20 {
        let report = service.assess(submission.clone()).expect("profile scores");
        for condition in Condition::ordered() {
            for model in ModelVariant::ordered() {
                let value = report.scores.get(condition, model).expect("cell present");
                assert!((5.0..=95.0).contains(&value));
            }
        }
    }
}
