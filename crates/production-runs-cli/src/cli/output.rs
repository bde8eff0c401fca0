//! Output formatting for the CLI
//!
//! Responses are rendered as a colored table, JSON or YAML.

use clap::ValueEnum;
use colored::Colorize;
use production_runs_client::contracts::STATUS_IN_PROGRESS;
use production_runs_client::{ProductionRun, RawResponse};
use std::fmt::Write;
use std::io;

use super::CliError;

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable table format with colors
    #[default]
    Table,
    /// JSON format for machine processing
    Json,
    /// YAML format
    Yaml,
}

/// Whether a response carries the whole collection or a single record
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Shape {
    Collection,
    Record,
}

/// Render a successful response in the requested format
///
/// JSON output is the body exactly as received. Table and YAML output fall
/// back to the raw body when it does not decode.
pub fn format_response(
    response: &RawResponse,
    format: OutputFormat,
    shape: Shape,
) -> Result<String, CliError> {
    let rendered = match format {
        OutputFormat::Json => response.text(),
        OutputFormat::Yaml => match response.json::<serde_json::Value>() {
            Ok(value) => {
                serde_yaml::to_string(&value).map_err(|e| CliError::Output(e.to_string()))?
            }
            Err(_) => response.text(),
        },
        OutputFormat::Table => {
            let runs = match shape {
                Shape::Collection => response.json::<Vec<ProductionRun>>(),
                Shape::Record => response.json::<ProductionRun>().map(|run| vec![run]),
            };
            match runs {
                Ok(runs) => format_table(&runs),
                Err(e) => {
                    tracing::debug!(error = %e, "Body is not a production run table, printing raw");
                    response.text()
                }
            }
        }
    };
    Ok(rendered)
}

/// Write a rendered response followed by a newline
pub fn write_response(
    out: &mut impl io::Write,
    response: &RawResponse,
    format: OutputFormat,
    shape: Shape,
) -> Result<(), CliError> {
    let rendered = format_response(response, format, shape)?;
    out.write_all(format!("{}\n", rendered.trim_end()).as_bytes())
        .map_err(|e| CliError::Output(e.to_string()))
}

const COLUMN_WIDTHS: [usize; 4] = [10, 16, 16, 8];

/// Render runs as a table
pub fn format_table(runs: &[ProductionRun]) -> String {
    let mut out = String::new();

    if runs.is_empty() {
        writeln!(out, "{}", "No production runs".dimmed()).ok();
        return out;
    }

    let header = format!(
        "{:<w0$} {:<w1$} {:<w2$} {:>w3$}  {}",
        "ID",
        "RUN CODE",
        "PRODUCT",
        "VOLUME",
        "STATUS",
        w0 = COLUMN_WIDTHS[0],
        w1 = COLUMN_WIDTHS[1],
        w2 = COLUMN_WIDTHS[2],
        w3 = COLUMN_WIDTHS[3],
    );
    writeln!(out, "{}", header.cyan().bold()).ok();
    writeln!(out, "{}", "-".repeat(66)).ok();

    for run in runs {
        let status = run.status.as_deref().unwrap_or("-");
        writeln!(
            out,
            "{:<w0$} {:<w1$} {:<w2$} {:>w3$}  {}",
            run.id_string().unwrap_or_else(|| "-".to_string()),
            run.run_code.as_deref().unwrap_or("-"),
            run.product_code.as_deref().unwrap_or("-"),
            run.volume.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string()),
            colorize_status(status),
            w0 = COLUMN_WIDTHS[0],
            w1 = COLUMN_WIDTHS[1],
            w2 = COLUMN_WIDTHS[2],
            w3 = COLUMN_WIDTHS[3],
        )
        .ok();
    }

    writeln!(out).ok();
    writeln!(out, "{} run(s)", runs.len().to_string().dimmed()).ok();
    out
}

fn colorize_status(status: &str) -> String {
    match status {
        STATUS_IN_PROGRESS => status.yellow().to_string(),
        "Complete" | "Completed" | "Done" => status.green().to_string(),
        "Cancelled" | "Canceled" | "Failed" => status.red().to_string(),
        _ => status.to_string(),
    }
}
