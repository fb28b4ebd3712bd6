//! Configuration management CLI commands.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::constants::APP_NAME;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Default output file for `generate`
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Default rule file
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Profile name written to the output
    #[arg(long, value_name = "NAME")]
    profile: Option<String>,

    /// Show the engine icon in the menu bar (true or false)
    #[arg(long, value_name = "BOOL")]
    show_in_menu_bar: Option<bool>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    config_file: Option<String>,
    paths: PathsOutput,
    profile: ProfileOutput,
}

#[derive(Serialize, Debug)]
struct PathsOutput {
    output_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    rules_file: Option<String>,
}

#[derive(Serialize, Debug)]
struct ProfileOutput {
    name: String,
    show_in_menu_bar: bool,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            output_json(&config)?;
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        // At least one argument must be provided
        if self.output.is_none()
            && self.rules.is_none()
            && self.profile.is_none()
            && self.show_in_menu_bar.is_none()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: \
                 --output, --rules, --profile, or --show-in-menu-bar",
            ));
        }

        // Load without validating so a stale rule file can be replaced;
        // the result is validated again before it is saved
        let mut config = Config::load_unvalidated()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if let Some(path) = &self.rules {
            config
                .set_rules_file(path.clone())
                .map_err(|e| CliError::validation(format!("{e:#}")))?;
        }

        if let Some(path) = &self.output {
            config
                .set_output_file(path.clone())
                .map_err(|e| CliError::validation(format!("{e:#}")))?;
        }

        if let Some(name) = &self.profile {
            if name.trim().is_empty() {
                return Err(CliError::validation("Profile name cannot be empty"));
            }
            config.profile.name.clone_from(name);
        }

        if let Some(show) = self.show_in_menu_bar {
            config.profile.show_in_menu_bar = show;
        }

        // A rule file that vanished since the last save must be replaced
        // with --rules; nothing is written until the config is valid again
        config
            .validate()
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        // Save configuration
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

/// Output configuration in JSON format
fn output_json(config: &Config) -> CliResult<()> {
    let output = ConfigOutput {
        config_file: Config::config_file_path()
            .ok()
            .map(|p| p.to_string_lossy().to_string()),
        paths: PathsOutput {
            output_file: config.output_path().to_string_lossy().to_string(),
            rules_file: config
                .paths
                .rules_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        },
        profile: ProfileOutput {
            name: config.profile.name.clone(),
            show_in_menu_bar: config.profile.show_in_menu_bar,
        },
    };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| CliError::io(format!("Failed to serialize configuration to JSON: {e}")))?;

    println!("{json}");
    Ok(())
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    println!("{APP_NAME} Configuration");
    println!("========================");
    println!();

    println!("Paths:");
    println!("  Output File: {}", config.output_path().display());
    if let Some(rules) = &config.paths.rules_file {
        println!("  Rule File:   {}", rules.display());
    } else {
        println!("  Rule File:   (built-in rules)");
    }
    println!();

    println!("Profile:");
    println!("  Name:             {}", config.profile.name);
    println!("  Show In Menu Bar: {}", config.profile.show_in_menu_bar);
    println!();
}
