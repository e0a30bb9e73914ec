use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::path::PathBuf;

use crate::cli::Commands;
use faasctl_core::{ExecutionRequest, ExecutionStatus, FunctionSpec, Language, SandboxMode};
use faasctl_metrics::{AggregatedMetricsRow, ExecutionMetricSample, Page};
use faasctl_orchestrator::Orchestrator;

pub async fn execute(command: Commands, orchestrator: Orchestrator) -> Result<()> {
    match command {
        Commands::Create {
            name,
            language,
            code,
            file,
            timeout,
        } => {
            let language: Language = language.parse()?;
            let code = read_code(code, file)?;
            let spec = FunctionSpec::new(name, language, code, timeout)?;

            let id = orchestrator.create_function(&spec).await?;

            println!("✓ Function created: {}", id);
            println!("  Name: {}", spec.name);
            println!("  Language: {}", spec.language);
            println!("  Timeout: {}s", spec.timeout_seconds);
        }

        Commands::List => {
            let functions = orchestrator.list_functions().await?;

            if functions.is_empty() {
                println!("No functions found.");
            } else {
                for function in functions {
                    println!("{}  {} ({})", function.id, function.name, function.language);
                }
            }
        }

        Commands::Get { id } => {
            let function = orchestrator.get_function(&id).await?;

            println!("ID: {}", function.id);
            println!("Name: {} ({})", function.name, function.language);
            println!("Timeout: {}s", function.timeout_seconds);
            println!("Code:");
            println!("{}", function.code);
        }

        Commands::Update {
            id,
            name,
            language,
            code,
            file,
            timeout,
        } => {
            let language: Language = language.parse()?;
            let code = read_code(code, file)?;
            let spec = FunctionSpec::new(name, language, code, timeout)?;

            orchestrator.update_function(&id, &spec).await?;

            println!("✓ Function updated: {}", id);
        }

        Commands::Delete { id } => {
            orchestrator.delete_function(&id).await?;

            println!("✓ Function deleted: {}", id);
        }

        Commands::Exec {
            language,
            code,
            file,
            timeout,
            isolated,
        } => {
            let language: Language = language.parse()?;
            let code = read_code(code, file)?;
            let mode = if isolated {
                SandboxMode::Isolated
            } else {
                SandboxMode::Plain
            };
            let request = ExecutionRequest::new(code, language, timeout, mode)?;

            let report = orchestrator.execute(&request).await?;

            match report.outcome.status {
                ExecutionStatus::Success => {
                    println!("✓ Execution succeeded");
                    if let Some(output) = &report.outcome.output {
                        println!("{}", output);
                    }
                }
                ExecutionStatus::Failure => {
                    println!("❌ Execution failed");
                    if let Some(message) = &report.outcome.error_message {
                        println!("   {}", message);
                    }
                }
            }

            match report.latest_sample {
                Some(sample) => print_sample("Latest recorded sample", &sample),
                None => println!("No recorded sample available for this family yet."),
            }
        }

        Commands::Metrics { id, limit, offset } => {
            let page = match limit {
                Some(limit) => Some(Page { limit, offset }),
                None if offset > 0 => Some(Page {
                    offset,
                    ..Page::default()
                }),
                None => None,
            };
            let report = orchestrator.function_metrics(&id, page).await?;

            let aggregate = &report.aggregate;
            println!("Function {}", id);
            println!(
                "  Executions: {} total, {} ok, {} failed",
                aggregate.total_executions,
                aggregate.successful_executions,
                aggregate.failed_executions
            );
            println!(
                "  Latency: avg {} / min {} / max {}",
                format_seconds(aggregate.avg_execution_time_seconds),
                format_seconds(aggregate.min_execution_time_seconds),
                format_seconds(aggregate.max_execution_time_seconds)
            );

            if report.samples.is_empty() {
                println!("  No samples recorded.");
            } else {
                println!("  Recent runs:");
                for sample in &report.samples {
                    print_sample("  -", sample);
                }
            }
        }

        Commands::History { since, until } => {
            let (rows, warnings) = match (since, until) {
                (Some(since), Some(until)) => {
                    let start = parse_time(&since)?;
                    let until = parse_time(&until)?;
                    (orchestrator.history_timeframe(start, until).await?, Vec::new())
                }
                _ => {
                    let view = orchestrator.history().await;
                    (view.rows, view.warnings)
                }
            };

            for warning in &warnings {
                println!("⚠ {} unavailable: {}", warning.source, warning.message);
            }

            if rows.is_empty() {
                println!("No metrics available.");
            } else {
                print_history(&rows);
            }
        }
    }

    Ok(())
}

fn read_code(code: Option<String>, file: Option<PathBuf>) -> Result<String> {
    match (code, file) {
        (Some(code), None) => Ok(code),
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Could not read code from {}", path.display())),
        _ => bail!("Provide the source with either --code or --file"),
    }
}

fn parse_time(input: &str) -> Result<DateTime<Utc>> {
    if let Ok(timestamp) = input.parse::<DateTime<Utc>>() {
        return Ok(timestamp);
    }

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .with_context(|| format!("Could not parse '{input}' as YYYY-MM-DD or RFC 3339"))?;
    let midnight = date.and_hms_opt(0, 0, 0).expect("midnight is a valid time");
    Ok(Utc.from_utc_datetime(&midnight))
}

fn print_sample(prefix: &str, sample: &ExecutionMetricSample) {
    let status = match sample.status {
        ExecutionStatus::Success => "success",
        ExecutionStatus::Failure => "failure",
    };

    // rounding happens here, at the edge; stored values keep precision
    println!(
        "{} {} in {:.2}s",
        prefix, status, sample.execution_time_seconds
    );
    if let Some(message) = &sample.error_message {
        println!("    {}", message);
    }
}

fn print_history(rows: &[AggregatedMetricsRow]) {
    println!(
        "{:<38} {:<24} {:>6} {:>6} {:>7} {:>8} {:>8} {:>8}",
        "SOURCE", "NAME", "TOTAL", "OK", "FAILED", "AVG(s)", "MIN(s)", "MAX(s)"
    );
    for row in rows {
        println!(
            "{:<38} {:<24} {:>6} {:>6} {:>7} {:>8} {:>8} {:>8}",
            row.source_id,
            row.source_name,
            row.total_executions,
            row.successful_executions,
            row.failed_executions,
            format_seconds(row.avg_execution_time_seconds),
            format_seconds(row.min_execution_time_seconds),
            format_seconds(row.max_execution_time_seconds)
        );
    }
}

fn format_seconds(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.2}"),
        None => "-".to_string(),
    }
}
