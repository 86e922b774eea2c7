use crate::report::{run_assess, run_batch, AssessArgs, BatchArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use health_risk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Health Risk Engine",
    about = "Score health profiles for diabetes, hypertension and heart disease risk",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a single profile given on the command line
    Assess(AssessArgs),
    /// Score every profile in a CSV export
    Batch(BatchArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) jitter: JitterArgs,
}

/// Random source overrides shared by every command.
#[derive(Args, Debug, Default, Clone, Copy)]
pub(crate) struct JitterArgs {
    /// Seed the jitter stream for reproducible scores
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Disable the per-score jitter entirely
    #[arg(long)]
    pub(crate) no_jitter: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess(args) => run_assess(args),
        Command::Batch(args) => run_batch(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_optional() {
        let cli = Cli::try_parse_from(["health-risk"]).expect("no subcommand parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn assess_accepts_profile_flags() {
        let cli = Cli::try_parse_from([
            "health-risk",
            "assess",
            "--age",
            "45",
            "--smoking-status",
            "occasional",
            "--family-history",
            "diabetes",
            "--condition",
            "heartDisease",
            "--no-jitter",
        ])
        .expect("assess parses");

        match cli.command {
            Some(Command::Assess(args)) => {
                assert_eq!(args.age, 45);
                assert!(args.jitter.no_jitter);
                assert_eq!(
                    args.condition,
                    Some(health_risk::assessment::Condition::HeartDisease)
                );
            }
            other => panic!("expected assess command, got {other:?}"),
        }
    }

    #[test]
    fn assess_rejects_unknown_labels() {
        let result = Cli::try_parse_from(["health-risk", "assess", "--smoking-status", "often"]);
        assert!(result.is_err());
    }
}
