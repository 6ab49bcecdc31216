//! `key=value` rendering for CI step outputs.
//!
//! The whole output is rendered up front and written in one call, so a
//! failing run never leaves partial lines behind.
use crate::params::ArgBundle;
use anyhow::{Context, Result};
use std::io::Write;

/// Literal text emitted for unset fields.
pub const UNSET: &str = "undefined";

/// Bundle fields in emission order, with `tags` last.
pub fn fields<'a>(bundle: &'a ArgBundle, tags: &'a str) -> [(&'static str, Option<&'a str>); 6] {
    [
        ("filename", Some(bundle.filename.as_str())),
        ("platforms", Some(bundle.platforms.as_str())),
        ("repo", Some(bundle.repo.as_str())),
        ("tag", Some(bundle.tag.as_str())),
        ("variants", bundle.variants.as_deref()),
        ("tags", Some(tags)),
    ]
}

pub fn render_lines(bundle: &ArgBundle, tags: &str) -> String {
    let mut out = String::new();
    for (key, value) in fields(bundle, tags) {
        push_line(&mut out, key, value.unwrap_or(UNSET));
    }
    out
}

fn push_line(out: &mut String, key: &str, value: &str) {
    out.push_str(key);
    out.push('=');
    out.push_str(value);
    out.push('\n');
}

pub fn write_lines<W: Write>(out: &mut W, text: &str) -> Result<()> {
    out.write_all(text.as_bytes())
        .context("write key=value lines")?;
    out.flush().context("flush output")?;
    Ok(())
}
