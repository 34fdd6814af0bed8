//! `ckan-repair bootstrap` command.

use std::path::Path;

use serde::Deserialize;

use crate::context::ServiceContext;

/// Contents of a defaults file.
#[derive(Debug, Default, Deserialize)]
pub struct Defaults {
    /// `organization_create` payloads, created in order.
    #[serde(default)]
    pub organizations: Vec<serde_json::Value>,
}

/// Read a YAML defaults file.
///
/// # Errors
///
/// Returns an error string if the file cannot be read or parsed.
pub fn load_defaults(path: &Path) -> Result<Defaults, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read defaults file {}: {e}", path.display()))?;
    serde_yaml::from_str(&content)
        .map_err(|e| format!("Failed to parse defaults file {}: {e}", path.display()))
}

/// Execute the `bootstrap` command.
///
/// # Errors
///
/// Returns an error string if the defaults cannot be loaded or an
/// organization is rejected; later organizations are not created.
pub async fn run(ctx: &ServiceContext, file: &Path) -> Result<(), String> {
    let defaults = load_defaults(file)?;
    if defaults.organizations.is_empty() {
        println!("No organizations in {}.", file.display());
        return Ok(());
    }

    for organization in &defaults.organizations {
        let label = organization.get("name").and_then(|n| n.as_str()).unwrap_or("<unnamed>");
        let created = ctx
            .catalog
            .create_organization(organization)
            .await
            .map_err(|e| format!("Failed to create organization {label}: {e}"))?;
        let id = created.get("id").and_then(|v| v.as_str()).unwrap_or("?");
        tracing::info!(organization = label, id, "organization created");
        println!("Created organization {label} ({id})");
    }
    Ok(())
}
