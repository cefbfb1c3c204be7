mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, OutputFormat};
use cropwatch::config::Config;
use cropwatch::export::alerts_to_csv;
use cropwatch::logic::{
    aggregate, forecast_window, validate_against_observed, AlertEngine, AlertSummary,
};
use cropwatch::models::{AlertEvent, ForecastDay, ForecastSeries, ObservedDay, Severity};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Init { force } => init(cli.config, force),
        command => {
            let config =
                Config::load(cli.config.as_deref()).context("loading configuration")?;
            run(command, &config)
        }
    }
}

fn init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match path {
        Some(p) => p,
        None => Config::default_config_path()?,
    };
    Config::default().write(&path, force)?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

fn run(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Evaluate {
            input,
            reference,
            since,
            format,
            summary,
        } => {
            let days = load_forecast(&input, since.or(config.window_start))?;
            let engine = AlertEngine::new(&config.thresholds);
            let alerts = match reference {
                Some(reference) => engine.evaluate_from(&days, reference)?,
                None => engine.evaluate(&days)?,
            };

            match format {
                OutputFormat::Csv => print!("{}", alerts_to_csv(&alerts)?),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&alerts)?),
            }

            if summary {
                print_summary(&alerts);
            }
        }
        Commands::Rules { check: None } => {
            let engine = AlertEngine::new(&config.thresholds);
            for rule in engine.list_rules() {
                println!();
                println!(
                    "  [{}] {}",
                    rule.category.as_str().to_uppercase(),
                    rule.severity.symbol()
                );
                println!("    Rule: {} ({})", rule.name, rule.rule_id);
                println!("    Description: {}", rule.description);
                println!("    Condition: {}", rule.condition);
                println!("    Severity: {}", rule.severity);
                println!("    Recommended Action: {}", rule.action);
            }
        }
        Commands::Rules { check: Some(input) } => {
            let days = load_forecast(&input, config.window_start)?;
            let engine = AlertEngine::new(&config.thresholds);

            let mut rules = engine.list_rules();
            rules.dedup_by_key(|r| r.rule_id);
            for rule in rules {
                let hits = engine.check_rule(rule.rule_id, &days)?;
                println!("{} ({}): {} day(s)", rule.name, rule.rule_id, hits.len());
                for (date, trigger) in hits {
                    println!("  {}  {}", date, trigger.message);
                }
            }
        }
        Commands::Validate {
            input,
            observed: observed_path,
        } => {
            let days = load_forecast(&input, config.window_start)?;
            let alerts = AlertEngine::new(&config.thresholds).evaluate(&days)?;

            let observed: Vec<ObservedDay> = serde_json::from_str(&read_input(&observed_path)?)
                .with_context(|| {
                    format!("parsing observations from {}", observed_path.display())
                })?;
            let report = validate_against_observed(&alerts, &observed, &config.thresholds)?;

            println!("Actual events ({} observed days):", report.observed_days);
            println!("  - Frost days: {}", report.actual_frost_days);
            println!("  - Heat stress days: {}", report.actual_heat_days);
            println!("  - High humidity days: {}", report.actual_high_humidity_days);
            println!("Alerts generated:");
            println!("  - Frost warnings: {}", report.frost_alerts);
            println!("  - Heat stress warnings: {}", report.heat_alerts);
            println!("  - Disease risk alerts: {}", report.disease_alerts);
        }
        // Runs before config is loaded, see main
        Commands::Init { .. } => {}
    }

    Ok(())
}

fn load_forecast(path: &Path, window_start: Option<chrono::NaiveDate>) -> Result<Vec<ForecastDay>> {
    let series: ForecastSeries = serde_json::from_str(&read_input(path)?)
        .with_context(|| format!("parsing forecast series from {}", path.display()))?;

    let days = aggregate(&series)?;
    Ok(match window_start {
        Some(start) => forecast_window(&days, start),
        None => days,
    })
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn print_summary(alerts: &[AlertEvent]) {
    let summary = AlertSummary::from_events(alerts);

    eprintln!("Total alerts generated: {}", summary.total);
    eprintln!("By type:");
    for (category, count) in &summary.by_category {
        eprintln!("  {:<24}{}", category.as_str(), count);
    }
    eprintln!("By severity:");
    for severity in Severity::ALL {
        eprintln!("  {:<24}{}", severity.as_str(), summary.count_severity(severity));
    }
    eprintln!("Lead time (days):");
    eprintln!("  {:<24}{:>6}{:>5}{:>5}{:>7}", "type", "mean", "min", "max", "count");
    for (category, stats) in &summary.lead_times {
        eprintln!(
            "  {:<24}{:>6.1}{:>5}{:>5}{:>7}",
            category.as_str(),
            stats.mean,
            stats.min,
            stats.max,
            stats.count
        );
    }
    if let Some(mean) = summary.mean_lead_time {
        eprintln!("Average lead time: {:.1} days", mean);
    }
}
