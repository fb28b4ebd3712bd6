//! Document assembly and output.
//!
//! A run is `build_document -> render_document -> write_document`; nothing
//! is retained between runs.

use crate::generator::hyper::hyper_rule;
use crate::generator::sublayer::compile_layers;
use crate::models::{KarabinerDocument, ProfileSettings, RuleTable};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Compiles a rule table into a complete document.
///
/// The hyper key group comes first, then one group per trigger key in
/// table order.
#[must_use]
pub fn build_document(table: &RuleTable, profile: &ProfileSettings) -> KarabinerDocument {
    let mut rules = Vec::with_capacity(table.layers.len() + 1);
    rules.push(hyper_rule(&table.hyper, &table.base));
    rules.extend(compile_layers(&table.layers, &table.hyper.modifiers));

    debug!(
        groups = rules.len(),
        manipulators = rules.iter().map(|r| r.manipulators.len()).sum::<usize>(),
        "built document"
    );

    KarabinerDocument::new(rules, profile)
}

/// Renders a document as pretty-printed JSON (two-space indent).
pub fn render_document(document: &KarabinerDocument) -> Result<String> {
    serde_json::to_string_pretty(document).context("Failed to serialize configuration")
}

/// Writes a document to `path`.
///
/// The document is rendered in full first, written to a sibling temp file
/// and renamed over the target, so the target is either replaced completely
/// or left untouched.
pub fn write_document(document: &KarabinerDocument, path: &Path) -> Result<()> {
    let content = render_document(document)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context(format!(
            "Failed to create output directory: {}",
            parent.display()
        ))?;
    }

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, &content).context(format!(
        "Failed to write temp output file: {}",
        temp_path.display()
    ))?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e).context(format!("Failed to write output file: {}", path.display()));
    }

    info!(path = %path.display(), bytes = content.len(), "wrote configuration");
    Ok(())
}
