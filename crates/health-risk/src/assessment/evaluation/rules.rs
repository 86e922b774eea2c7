use super::super::domain::{
    AlcoholConsumption, Condition, HealthProfile, PhysicalActivity, SmokingStatus,
};
use super::{FactorContribution, RiskFactorKind};

/// Applies every factor rule in order and returns the matched contributions.
/// Summing the contributions in the returned order yields the base risk.
pub(crate) fn score_factors(
    profile: &HealthProfile,
    condition: Condition,
) -> Vec<FactorContribution> {
    let mut contributions = Vec::new();
    let mut push = |factor: RiskFactorKind, weight: f64, notes: String| {
        contributions.push(FactorContribution {
            factor,
            weight,
            notes,
        });
    };

    let age = profile.age;
    if age > 50 {
        push(RiskFactorKind::Age, 0.15, format!("age {age} over 50"));
    } else if age > 40 {
        push(RiskFactorKind::Age, 0.10, format!("age {age} over 40"));
    } else if age > 30 {
        push(RiskFactorKind::Age, 0.05, format!("age {age} over 30"));
    }

    let bmi = profile.bmi;
    if bmi > 30.0 {
        push(RiskFactorKind::Bmi, 0.20, format!("bmi {bmi:.1} in obese range"));
    } else if bmi > 25.0 {
        push(
            RiskFactorKind::Bmi,
            0.10,
            format!("bmi {bmi:.1} in overweight range"),
        );
    }

    let systolic = profile.blood_pressure_systolic;
    let diastolic = profile.blood_pressure_diastolic;
    if systolic > 140 || diastolic > 90 {
        push(
            RiskFactorKind::BloodPressure,
            0.20,
            format!("blood pressure {systolic}/{diastolic} above 140/90"),
        );
    } else if systolic > 130 || diastolic > 85 {
        push(
            RiskFactorKind::BloodPressure,
            0.10,
            format!("blood pressure {systolic}/{diastolic} above 130/85"),
        );
    }

    let cholesterol = profile.cholesterol_level;
    if cholesterol > 240 {
        push(
            RiskFactorKind::Cholesterol,
            0.15,
            format!("cholesterol {cholesterol} above 240"),
        );
    } else if cholesterol > 200 {
        push(
            RiskFactorKind::Cholesterol,
            0.10,
            format!("cholesterol {cholesterol} above 200"),
        );
    }

    let glucose = profile.glucose_level;
    if glucose > 126 {
        push(
            RiskFactorKind::Glucose,
            0.20,
            format!("glucose {glucose} above 126"),
        );
    } else if glucose > 100 {
        push(
            RiskFactorKind::Glucose,
            0.10,
            format!("glucose {glucose} above 100"),
        );
    }

    match profile.smoking_status {
        SmokingStatus::Regular => push(RiskFactorKind::Smoking, 0.20, "regular smoker".into()),
        SmokingStatus::Occasional => {
            push(RiskFactorKind::Smoking, 0.10, "occasional smoker".into())
        }
        SmokingStatus::Former => push(RiskFactorKind::Smoking, 0.05, "former smoker".into()),
        SmokingStatus::No => {}
    }

    match profile.alcohol_consumption {
        AlcoholConsumption::Heavy => {
            push(RiskFactorKind::Alcohol, 0.15, "heavy alcohol use".into())
        }
        AlcoholConsumption::Moderate => {
            push(RiskFactorKind::Alcohol, 0.05, "moderate alcohol use".into())
        }
        AlcoholConsumption::Light | AlcoholConsumption::None => {}
    }

    match profile.physical_activity {
        PhysicalActivity::Sedentary => push(
            RiskFactorKind::PhysicalActivity,
            0.15,
            "sedentary lifestyle".into(),
        ),
        PhysicalActivity::Light => push(
            RiskFactorKind::PhysicalActivity,
            0.05,
            "light physical activity".into(),
        ),
        PhysicalActivity::Vigorous => push(
            RiskFactorKind::PhysicalActivity,
            -0.05,
            "vigorous physical activity".into(),
        ),
        PhysicalActivity::Moderate => {}
    }

    let history = profile.family_history;
    if history.matches(condition) {
        push(
            RiskFactorKind::FamilyHistory,
            0.25,
            format!("family history of {}", history.as_str()),
        );
    }

    match condition {
        Condition::Diabetes if glucose > 110 => push(
            RiskFactorKind::ConditionSpecific,
            0.15,
            format!("glucose {glucose} above 110"),
        ),
        Condition::Hypertension if systolic > 130 || diastolic > 85 => push(
            RiskFactorKind::ConditionSpecific,
            0.15,
            format!("blood pressure {systolic}/{diastolic} above 130/85"),
        ),
        Condition::HeartDisease
            if cholesterol > 220 || profile.smoking_status == SmokingStatus::Regular =>
        {
            push(
                RiskFactorKind::ConditionSpecific,
                0.15,
                "cholesterol above 220 or regular smoker".into(),
            )
        }
        _ => {}
    }

    contributions
}
