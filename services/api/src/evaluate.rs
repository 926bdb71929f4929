use crate::decisions::{DecisionReport, DecisionScenario};
use clap::Args;
use serde_json::json;
use std::path::PathBuf;
use upgrade_engine::config::AppConfig;
use upgrade_engine::decision::UpgradableSpecification;
use upgrade_engine::error::AppError;
use upgrade_engine::telemetry;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// JSON file holding both profiles, the held items and the candidate
    #[arg(long)]
    pub(crate) scenario: PathBuf,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let raw = std::fs::read_to_string(&args.scenario)?;
    let specification = UpgradableSpecification::new(config.engine.score_cache_ttl);
    let report = evaluate_scenario(&specification, &raw)?;

    let output = json!({
        "scenario": args.scenario.display().to_string(),
        "upgradable": report.upgradable,
        "upgrade_allowed": report.upgrade_allowed,
        "cutoff_not_met": report.cutoff_not_met,
        "accepted": report.accepted(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub(crate) fn evaluate_scenario(
    specification: &UpgradableSpecification,
    raw: &str,
) -> Result<DecisionReport, AppError> {
    let scenario: DecisionScenario = serde_json::from_str(raw)?;
    scenario.evaluate(specification)
}
