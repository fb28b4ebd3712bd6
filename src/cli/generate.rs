//! Generate command for the engine configuration.

use crate::cli::common::{load_config, load_rule_table, rule_source, CliError, CliResult};
use crate::generator::{build_document, render_document, write_document, TableValidator};
use clap::Args;
use std::path::PathBuf;
use tracing::warn;

/// Generate karabiner.json from the rule table
#[derive(Debug, Clone, Args, Default)]
pub struct GenerateArgs {
    /// Rule file (.toml, .json, .json5); built-in rules when omitted
    #[arg(short, long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Output file (defaults to the configured path or ./karabiner.json)
    #[arg(short, long, value_name = "FILE", conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the document to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

impl GenerateArgs {
    /// Execute the generate command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let source = rule_source(self.rules.as_deref(), &config);
        let table = load_rule_table(&source)?;

        // Validate before generating
        let report = TableValidator::new(&table).validate();
        if !report.is_valid() {
            return Err(CliError::validation(format!(
                "Rule validation failed:\n{}",
                report.format_message()
            )));
        }
        for warning in &report.warnings {
            warn!("{warning}");
        }

        let document = build_document(&table, &config.profile_settings());

        if self.stdout {
            let json = render_document(&document)
                .map_err(|e| CliError::io(format!("Failed to render configuration: {e:#}")))?;
            println!("{json}");
            return Ok(());
        }

        let output = self.output.clone().unwrap_or_else(|| config.output_path());
        write_document(&document, &output)
            .map_err(|e| CliError::io(format!("Failed to write configuration: {e:#}")))?;

        let manipulators: usize = document.rules().iter().map(|r| r.manipulators.len()).sum();
        println!(
            "✓ Generated {} rules ({} manipulators) from {}",
            document.rules().len(),
            manipulators,
            source
        );
        println!("  Output: {}", output.display());

        Ok(())
    }
}
