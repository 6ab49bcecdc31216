//! Image tag derivation.
use std::collections::BTreeSet;

/// Map a comma-separated variant list to tag suffixes.
///
/// Tokens are trimmed and lowercased; an empty token maps to the empty
/// suffix, so the result always holds at least one entry.
pub fn suffixes(variants: &str) -> Vec<String> {
    variants
        .split(',')
        .map(|variant| {
            let variant = variant.trim().to_lowercase();
            if variant.is_empty() {
                String::new()
            } else {
                format!("-{variant}")
            }
        })
        .collect()
}

/// Build `latest` and versioned tags for every organization and suffix.
///
/// Organizations are the outer loop, suffixes the inner one. Duplicates are
/// dropped while keeping first-insertion order.
pub fn derive_tags(
    organizations: &[String],
    repo: &str,
    tag: &str,
    suffixes: &[String],
) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut tags = Vec::new();
    for org in organizations {
        for suffix in suffixes {
            for candidate in [
                format!("{org}/{repo}:latest{suffix}"),
                format!("{org}/{repo}:{tag}{suffix}"),
            ] {
                if seen.insert(candidate.clone()) {
                    tags.push(candidate);
                }
            }
        }
    }
    tracing::debug!(count = tags.len(), "derived image tags");
    tags
}
