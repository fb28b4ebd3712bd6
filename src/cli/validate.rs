//! Validation command for rule tables.

use crate::cli::common::{load_config, load_rule_table, rule_source, CliError, CliResult};
use crate::generator::TableValidator;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Validate a rule table for errors and warnings
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Rule file (.toml, .json, .json5); built-in rules when omitted
    #[arg(short, long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

/// JSON response of the validate command
#[derive(Debug, Serialize)]
struct ValidationResponse {
    valid: bool,
    source: String,
    triggers: usize,
    messages: Vec<ValidationMessage>,
}

#[derive(Debug, Serialize)]
struct ValidationMessage {
    severity: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    trigger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<String>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let source = rule_source(self.rules.as_deref(), &config);
        let table = load_rule_table(&source)?;

        let report = TableValidator::new(&table).validate();

        let mut messages: Vec<ValidationMessage> = report
            .errors
            .iter()
            .map(|error| ValidationMessage {
                severity: "error",
                message: format!("{}: {}", error.kind, error.message),
                trigger: error.trigger.as_ref().map(ToString::to_string),
                suggestion: error.suggestion.clone(),
            })
            .collect();
        messages.extend(report.warnings.iter().map(|warning| ValidationMessage {
            severity: "warning",
            message: warning.message.clone(),
            trigger: None,
            suggestion: None,
        }));

        let response = ValidationResponse {
            valid: report.is_valid(),
            source: source.to_string(),
            triggers: table.layers.len(),
            messages,
        };

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            if response.valid {
                println!("✓ Validation passed");
            } else {
                println!("✗ Validation failed");
            }
            println!("  Source:   {}", response.source);
            println!("  Triggers: {}", response.triggers);

            if !response.messages.is_empty() {
                println!("\nIssues:");
                for msg in &response.messages {
                    let prefix = if msg.severity == "error" {
                        "  ✗"
                    } else {
                        "  ⚠"
                    };
                    match &msg.trigger {
                        Some(trigger) => println!("{prefix} [Hyper+{trigger}] {}", msg.message),
                        None => println!("{prefix} {}", msg.message),
                    }
                    if let Some(suggestion) = &msg.suggestion {
                        println!("      → {suggestion}");
                    }
                }
            }
        }

        // Exit code
        if !response.valid {
            return Err(CliError::validation("Validation failed"));
        }

        if self.strict && !report.warnings.is_empty() {
            return Err(CliError::validation("Warnings found in strict mode"));
        }

        Ok(())
    }
}
