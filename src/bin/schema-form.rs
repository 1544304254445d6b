//! Schema-Form CLI
//!
//! Command-line interface for normalizing resource schemas, inspecting the
//! forms they produce, and checking schema files.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use schema_form::{
    check, load_document_auto, normalize, CollectSink, FileStatus, FlatForm, FormOptions,
    GroupedForm, RenderQueue, Severity,
};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "schema-form")]
#[command(about = "Normalize resource schemas and inspect the forms they produce")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a schema and print the result
    Normalize {
        /// Schema source: file path or URL (http:// or https://)
        schema: String,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Suppress advisory warnings
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show which fields a form over the schema would display
    Inspect {
        /// Schema source: file path or URL
        schema: String,

        /// Values source: file path or URL (defaults to an empty document)
        #[arg(long)]
        values: Option<String>,

        /// Show only required fields
        #[arg(long, conflicts_with = "required_and_empty")]
        required_only: bool,

        /// Show only required fields that are currently empty
        #[arg(long, conflicts_with = "required_only")]
        required_and_empty: bool,

        /// Output results as JSON (for automation)
        #[arg(long)]
        json: bool,
    },

    /// Check schema files for errors and advisories
    Check {
        /// File or directory to check
        path: PathBuf,

        /// Output format: text (default) or json
        #[arg(long, default_value = "text")]
        format: String,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,

        /// Suppress progress output, only show errors
        #[arg(long, short)]
        quiet: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Normalize {
            schema,
            output,
            pretty,
            quiet,
        } => run_normalize(&schema, output, pretty, quiet),

        Commands::Inspect {
            schema,
            values,
            required_only,
            required_and_empty,
            json,
        } => run_inspect(&schema, values.as_deref(), required_only, required_and_empty, json),

        Commands::Check {
            path,
            format,
            strict,
            quiet,
        } => run_check(&path, &format, strict, quiet),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn run_normalize(
    schema_source: &str,
    output: Option<PathBuf>,
    pretty: bool,
    quiet: bool,
) -> Result<(), u8> {
    let raw = load_document_auto(schema_source).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let mut sink = CollectSink::new();
    let schema = normalize(&raw, &mut sink);

    if !quiet {
        for advisory in &sink.advisories {
            eprintln!(
                "warning[{}]: {} - {}",
                advisory.code, advisory.path, advisory.message
            );
        }
    }

    let json_output = if pretty {
        serde_json::to_string_pretty(schema.as_value())
    } else {
        serde_json::to_string(schema.as_value())
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;

    match output {
        Some(path) => {
            std::fs::write(&path, &json_output).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", json_output);
        }
    }

    Ok(())
}

fn run_inspect(
    schema_source: &str,
    values_source: Option<&str>,
    required_only: bool,
    required_and_empty: bool,
    json_output: bool,
) -> Result<(), u8> {
    let raw = load_document_auto(schema_source).map_err(|e| {
        eprintln!("Error loading schema: {}", e);
        e.exit_code() as u8
    })?;

    let values = match values_source {
        Some(source) => load_document_auto(source).map_err(|e| {
            eprintln!("Error loading values: {}", e);
            e.exit_code() as u8
        })?,
        None => json!({}),
    };

    let mut sink = CollectSink::new();
    let schema = normalize(&raw, &mut sink);

    let options = FormOptions::new()
        .show_only_required(required_only)
        .show_only_required_and_empty(required_and_empty);

    let queue = RenderQueue::new();
    let report = if schema.is_collection() {
        let form = GroupedForm::new(&schema, &values, options, &queue).map_err(|e| {
            eprintln!("Error: {}", e);
            e.exit_code() as u8
        })?;
        grouped_report(&form)
    } else {
        let form = FlatForm::new(&schema, &values, options, &queue).map_err(|e| {
            eprintln!("Error: {}", e);
            e.exit_code() as u8
        })?;
        flat_report(&form)
    };
    queue.run_pending();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
    } else {
        print_report(&report);
    }

    Ok(())
}

fn flat_report(form: &FlatForm) -> Value {
    json!({
        "grouped": false,
        "display": form.should_display(),
        "fields": form.field_keys(),
        "valid": form.is_valid(),
        "data": form.get_data(),
    })
}

fn grouped_report(form: &GroupedForm) -> Value {
    let groups: Vec<Value> = form
        .group_keys()
        .iter()
        .map(|key| {
            json!({
                "key": key,
                "title": form.group_title(key),
                "fields": form.group_field_keys(key),
            })
        })
        .collect();

    json!({
        "grouped": true,
        "display": form.display_form(),
        "groups": groups,
        "valid": form.is_valid(),
        "data": form.get_data(),
    })
}

fn print_report(report: &Value) {
    let display = report["display"].as_bool().unwrap_or(false);
    if !display {
        println!("Nothing to display: every field is filled in.");
        return;
    }

    if report["grouped"].as_bool().unwrap_or(false) {
        let groups = report["groups"].as_array().cloned().unwrap_or_default();
        println!("Collection schema: {} group(s)", groups.len());
        for group in &groups {
            let key = group["key"].as_str().unwrap_or("?");
            match group["title"].as_str() {
                Some(title) => println!("  {} ({})", key, title),
                None => println!("  {}", key),
            }
            if let Some(fields) = group["fields"].as_array() {
                for field in fields {
                    println!("    - {}", field.as_str().unwrap_or("?"));
                }
            }
        }
    } else {
        println!("Field schema");
        if let Some(fields) = report["fields"].as_array() {
            for field in fields {
                println!("  - {}", field.as_str().unwrap_or("?"));
            }
        }
    }

    println!(
        "valid: {}",
        report["valid"].as_bool().unwrap_or(false)
    );
    println!(
        "data: {}",
        serde_json::to_string(&report["data"]).unwrap_or_default()
    );
}

fn run_check(path: &Path, format: &str, strict: bool, quiet: bool) -> Result<(), u8> {
    if !path.exists() {
        eprintln!("Error: path not found: {}", path.display());
        return Err(2);
    }

    let result = check(path, strict);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&result).unwrap_or_default());
    } else {
        if !quiet {
            println!("Checking {} ...\n", path.display());
        }

        for file_result in &result.results {
            let status_icon = match file_result.status {
                FileStatus::Ok => "\x1b[32m✓\x1b[0m",
                FileStatus::Warning => "\x1b[33m⚠\x1b[0m",
                FileStatus::Error => "\x1b[31m✗\x1b[0m",
            };

            if !quiet || file_result.status != FileStatus::Ok {
                println!("  {} {}", status_icon, file_result.file.display());
            }

            for diag in &file_result.diagnostics {
                let color = match diag.severity {
                    Severity::Error => "\x1b[31m",
                    Severity::Warning => "\x1b[33m",
                };
                if !quiet || diag.severity == Severity::Error {
                    println!(
                        "    {}{}[{}]\x1b[0m: {} - {}",
                        color,
                        match diag.severity {
                            Severity::Error => "error",
                            Severity::Warning => "warning",
                        },
                        diag.code,
                        diag.path,
                        diag.message
                    );
                }
            }
        }

        println!();
        if result.is_ok() && (!strict || result.warnings == 0) {
            println!(
                "\x1b[32m✓ {} files checked, all passed\x1b[0m",
                result.files_checked
            );
        } else {
            println!(
                "\x1b[31m✗ {} files checked: {} passed, {} failed ({} errors, {} warnings)\x1b[0m",
                result.files_checked, result.passed, result.failed, result.errors, result.warnings
            );
        }
    }

    if result.is_ok() && (!strict || result.warnings == 0) {
        Ok(())
    } else {
        Err(1)
    }
}
