//! List command: show every hyper binding in the rule table.

use crate::cli::common::{load_config, load_rule_table, rule_source, CliError, CliResult};
use crate::generator::actions::describe;
use crate::generator::sublayer_variable;
use crate::models::LayerEntry;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// List hyper shortcuts and sublayer bindings
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Rule file (.toml, .json, .json5); built-in rules when omitted
    #[arg(short, long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct TriggerOutput {
    trigger: String,
    /// `sublayer` or `direct`
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variable: Option<String>,
    bindings: Vec<BindingOutput>,
}

#[derive(Debug, Serialize)]
struct BindingOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    description: String,
}

impl ListArgs {
    /// Execute the list command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let source = rule_source(self.rules.as_deref(), &config);
        let table = load_rule_table(&source)?;

        let triggers: Vec<TriggerOutput> = table
            .layers
            .iter()
            .map(|(trigger, entry)| match entry {
                LayerEntry::Sublayer(sublayer) => TriggerOutput {
                    trigger: trigger.to_string(),
                    kind: "sublayer",
                    variable: Some(sublayer_variable(trigger)),
                    bindings: sublayer
                        .iter()
                        .map(|(key, action)| BindingOutput {
                            key: Some(key.to_string()),
                            description: describe(action),
                        })
                        .collect(),
                },
                LayerEntry::Direct(action) => TriggerOutput {
                    trigger: trigger.to_string(),
                    kind: "direct",
                    variable: None,
                    bindings: vec![BindingOutput {
                        key: None,
                        description: describe(action),
                    }],
                },
            })
            .collect();

        if self.json {
            let json = serde_json::to_string_pretty(&triggers)
                .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
            println!("{json}");
            return Ok(());
        }

        println!("Hyper key: {} ({})", table.hyper.from, source);
        for trigger in &triggers {
            println!();
            match trigger.kind {
                "sublayer" => println!("Hyper+{}  (sublayer)", trigger.trigger),
                _ => println!("Hyper+{}", trigger.trigger),
            }
            for binding in &trigger.bindings {
                match &binding.key {
                    Some(key) => println!("  {key:<16} {}", binding.description),
                    None => println!("  {}", binding.description),
                }
            }
        }

        Ok(())
    }
}
