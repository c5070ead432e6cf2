use clap::Parser;
use derive_annotate::{
    RunReport, annotate_file, compile_rules, default_rules, generate_run_id, is_rust_source,
    load_rules,
};
use std::fs;

/// Prepend derive attributes above struct and enum headers in a Rust source file
#[derive(Parser, Debug)]
#[command(name = "derive-annotate")]
#[command(version = "0.1.0")]
#[command(about = "Insert derive markers above struct/enum declarations", long_about = None)]
struct Args {
    /// File to annotate (overwritten in place)
    #[arg(short, long)]
    file: String,

    /// JSON file with custom pattern/marker rules (omit for the built-in struct/enum pair)
    #[arg(short, long)]
    rules: Option<String>,

    /// Output structured JSON instead of human-readable
    #[arg(short, long)]
    json: bool,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<String>,
}

fn main() {
    let args = Args::parse();

    let run_id = generate_run_id();

    // Load rules before touching the target file
    let rules = match args.rules.as_ref() {
        Some(path) => match load_rules(path) {
            Ok(rules) => rules,
            Err(e) => {
                eprintln!("Error loading rules: {}", e);
                std::process::exit(1);
            }
        },
        None => default_rules(),
    };

    let compiled = match compile_rules(&rules) {
        Ok(compiled) => compiled,
        Err(e) => {
            eprintln!("Error compiling rules: {}", e);
            std::process::exit(1);
        }
    };

    if !is_rust_source(&args.file) {
        eprintln!("Warning: '{}' does not look like a Rust source file", args.file);
    }

    // Read, transform, overwrite
    let report = match annotate_file(&args.file, &compiled) {
        Ok(annotated) => RunReport::success(run_id, &annotated),
        Err(e) => RunReport::failure(run_id, format!("Failed to annotate '{}': {}", args.file, e)),
    };

    output_report(&report, args.json, args.output.as_ref());

    if !report.success {
        std::process::exit(1);
    }
}

/// Format and output the run report
fn output_report(report: &RunReport, json_mode: bool, output_path: Option<&String>) {
    let output = if json_mode {
        serde_json::to_string_pretty(report)
            .unwrap_or_else(|_| r#"{"error": "Failed to serialize report"}"#.to_string())
    } else if report.success {
        let mut lines = vec![format!(
            "Updated the file: {}",
            report.path.as_deref().unwrap_or("?")
        )];
        lines.push(format!("Inserted {} marker(s)", report.inserted_count));
        for rule_count in &report.rule_counts {
            lines.push(format!("  {}: {}", rule_count.rule, rule_count.count));
        }
        lines.join("\n")
    } else {
        format!(
            "Error: {}",
            report.error.as_deref().unwrap_or("Unknown error")
        )
    };

    if let Some(path) = output_path {
        if let Err(e) = fs::write(path, &output) {
            eprintln!("Failed to write output to '{}': {}", path, e);
            std::process::exit(1);
        }
    } else {
        println!("{}", output);
    }
}
