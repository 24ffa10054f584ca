use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use convrule_archive::to_archive;
use convrule_core::{MatchContext, Rule};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Conversion-rule validation and matching toolchain.
#[derive(Parser)]
#[command(name = "convrule", version, about = "Conversion-rule validation and matching")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a rule file (single rule object or array of rules)
    Validate {
        /// Path to the rules JSON file
        rules: PathBuf,
    },

    /// Match rules against an observation snapshot
    Match {
        /// Path to the rules JSON file
        rules: PathBuf,
        /// Path to the context JSON file ({"events": [...], "values": {...}})
        #[arg(long)]
        context: PathBuf,
    },

    /// Re-archive a rule file in canonical form to stdout
    Repack {
        /// Path to the rules JSON file
        rules: PathBuf,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("{path} is not valid JSON: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("{path}: expected a rule object or an array of rule objects")]
    NotARuleFile { path: String },
    #[error("{path}: rule {index} is invalid")]
    InvalidRule { path: String, index: usize },
    #[error("{path}: expected an object with an \"events\" array and optional \"values\" map")]
    InvalidContext { path: String },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { rules } => cmd_validate(&rules, cli.output),
        Commands::Match { rules, context } => cmd_match(&rules, &context, cli.output),
        Commands::Repack { rules } => cmd_repack(&rules),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

fn load_json(path: &Path) -> Result<serde_json::Value, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// Split a rule file into individual rule records. A single object counts
/// as a one-element list.
fn rule_records(doc: &serde_json::Value, path: &Path) -> Result<Vec<serde_json::Value>, CliError> {
    match doc {
        serde_json::Value::Array(items) => Ok(items.clone()),
        serde_json::Value::Object(_) => Ok(vec![doc.clone()]),
        _ => Err(CliError::NotARuleFile {
            path: path.display().to_string(),
        }),
    }
}

/// Parse every record, failing on the first invalid one.
fn load_rules(path: &Path) -> Result<Vec<Rule>, CliError> {
    let doc = load_json(path)?;
    let records = rule_records(&doc, path)?;
    let mut rules = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let rule = Rule::from_json(record).ok_or_else(|| CliError::InvalidRule {
            path: path.display().to_string(),
            index,
        })?;
        rules.push(rule);
    }
    Ok(rules)
}

#[derive(Serialize)]
struct ValidationReport {
    valid: bool,
    rules: Vec<RuleValidity>,
}

#[derive(Serialize)]
struct RuleValidity {
    index: usize,
    valid: bool,
}

fn cmd_validate(rules_path: &Path, output: OutputFormat) -> Result<bool, CliError> {
    let doc = load_json(rules_path)?;
    let records = rule_records(&doc, rules_path)?;

    let rules: Vec<RuleValidity> = records
        .iter()
        .enumerate()
        .map(|(index, record)| RuleValidity {
            index,
            valid: Rule::from_json(record).is_some(),
        })
        .collect();
    let valid = !rules.is_empty() && rules.iter().all(|r| r.valid);
    let report = ValidationReport { valid, rules };

    match output {
        OutputFormat::Json => {
            let pretty = serde_json::to_string_pretty(&report)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
        OutputFormat::Text => {
            for r in &report.rules {
                println!("rule {}: {}", r.index, if r.valid { "ok" } else { "invalid" });
            }
            println!("{}", if report.valid { "valid" } else { "invalid" });
        }
    }
    Ok(report.valid)
}

#[derive(Serialize)]
struct MatchReport {
    results: Vec<MatchResult>,
}

#[derive(Serialize)]
struct MatchResult {
    index: usize,
    conversion_value: u64,
    priority: i64,
    matched: bool,
}

fn cmd_match(
    rules_path: &Path,
    context_path: &Path,
    output: OutputFormat,
) -> Result<bool, CliError> {
    let rules = load_rules(rules_path)?;

    let context_doc = load_json(context_path)?;
    let ctx = MatchContext::from_json(&context_doc).ok_or_else(|| CliError::InvalidContext {
        path: context_path.display().to_string(),
    })?;

    // Per-rule results only; picking a winner among matched rules is the
    // aggregation layer's job, not this tool's.
    let results: Vec<MatchResult> = rules
        .iter()
        .enumerate()
        .map(|(index, rule)| MatchResult {
            index,
            conversion_value: rule.conversion_value(),
            priority: rule.priority(),
            matched: rule.is_matched(&ctx),
        })
        .collect();

    match output {
        OutputFormat::Json => {
            let report = MatchReport { results };
            let pretty = serde_json::to_string_pretty(&report)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
        OutputFormat::Text => {
            for r in &results {
                println!(
                    "rule {}: conversion_value={} priority={} matched={}",
                    r.index, r.conversion_value, r.priority, r.matched
                );
            }
        }
    }
    Ok(true)
}

fn cmd_repack(rules_path: &Path) -> Result<bool, CliError> {
    let rules = load_rules(rules_path)?;
    let archived: Vec<serde_json::Value> = rules.iter().map(to_archive).collect();
    let pretty = serde_json::to_string_pretty(&archived)
        .unwrap_or_else(|e| format!("serialization error: {}", e));
    println!("{}", pretty);
    Ok(true)
}
