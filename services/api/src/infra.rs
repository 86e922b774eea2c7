use crate::cli::JitterArgs;
use health_risk::assessment::{ConfiguredJitter, RiskAssessmentService, ScoringConfig};
use health_risk::config::ScoringSettings;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Command-line flags win over the environment: `--no-jitter` disables the
/// draw and `--seed` replaces any configured seed.
pub(crate) fn jitter_settings(settings: ScoringSettings, args: JitterArgs) -> ScoringSettings {
    ScoringSettings {
        jitter_enabled: settings.jitter_enabled && !args.no_jitter,
        jitter_seed: args.seed.or(settings.jitter_seed),
    }
}

pub(crate) fn assessment_service(
    settings: ScoringSettings,
    args: JitterArgs,
) -> RiskAssessmentService<ConfiguredJitter> {
    let settings = jitter_settings(settings, args);
    let jitter = ConfiguredJitter::from_settings(settings.jitter_enabled, settings.jitter_seed);
    debug!(jitter = jitter.describe(), "configured scoring jitter");
    RiskAssessmentService::new(ScoringConfig::standard(), jitter)
}
