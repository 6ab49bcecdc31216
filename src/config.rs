//! Build defaults and registry organizations.
//!
//! Defaults are plain values handed to the normalizer and tag generator; an
//! optional JSON file can override them per pipeline.
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_PLATFORMS: &str = "linux/amd64,linux/arm64";
pub const DEFAULT_REPO: &str = "versatiles";
pub const DEFAULT_VARIANTS: &str = "";
pub const DEFAULT_ORGANIZATIONS: [&str; 2] = ["versatiles", "ghcr.io/versatiles-org"];

/// Defaults applied to unset optional fields, plus the organizations every
/// image is published under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDefaults {
    pub platforms: String,
    pub repo: String,
    pub variants: String,
    pub organizations: Vec<String>,
}

impl Default for BuildDefaults {
    fn default() -> Self {
        Self {
            platforms: DEFAULT_PLATFORMS.to_string(),
            repo: DEFAULT_REPO.to_string(),
            variants: DEFAULT_VARIANTS.to_string(),
            organizations: DEFAULT_ORGANIZATIONS
                .iter()
                .map(|org| org.to_string())
                .collect(),
        }
    }
}

/// On-disk override file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DefaultsFile {
    #[serde(default)]
    default_platforms: Option<String>,
    #[serde(default)]
    default_repo: Option<String>,
    #[serde(default)]
    default_variants: Option<String>,
    #[serde(default)]
    organizations: Option<Vec<String>>,
}

/// Resolve defaults, reading `path` when given.
pub fn load_defaults(path: Option<&Path>) -> Result<BuildDefaults> {
    let Some(path) = path else {
        return Ok(BuildDefaults::default());
    };
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let file: DefaultsFile = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse config JSON {}", path.display()))?;
    let defaults =
        apply_overrides(file).with_context(|| format!("invalid config {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        organizations = defaults.organizations.len(),
        "loaded build defaults"
    );
    Ok(defaults)
}

fn apply_overrides(file: DefaultsFile) -> Result<BuildDefaults> {
    let mut defaults = BuildDefaults::default();
    if let Some(platforms) = file.default_platforms {
        defaults.platforms = platforms.trim().to_string();
    }
    if let Some(repo) = file.default_repo {
        defaults.repo = repo.trim().to_string();
    }
    if let Some(variants) = file.default_variants {
        defaults.variants = variants.trim().to_string();
    }
    if let Some(organizations) = file.organizations {
        defaults.organizations = organizations
            .iter()
            .map(|org| org.trim().trim_end_matches('/').to_string())
            .collect();
    }
    validate_defaults(&defaults)?;
    Ok(defaults)
}

/// Check that the defaults can produce well-formed tags.
pub fn validate_defaults(defaults: &BuildDefaults) -> Result<()> {
    if defaults.platforms.trim().is_empty() {
        return Err(anyhow!("default_platforms must be non-empty"));
    }
    if defaults.repo.trim().is_empty() {
        return Err(anyhow!("default_repo must be non-empty"));
    }
    if defaults.organizations.is_empty() {
        return Err(anyhow!("organizations must list at least one entry"));
    }
    if let Some(index) = defaults
        .organizations
        .iter()
        .position(|org| org.trim().is_empty())
    {
        return Err(anyhow!("organizations[{index}] must be non-empty"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
