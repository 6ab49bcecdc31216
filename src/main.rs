use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod output;
mod params;
mod tags;

use config::BuildDefaults;
use params::{ArgBundle, ParamsError};

fn main() -> Result<()> {
    let args = cli::RootArgs::parse();
    init_tracing(args.verbose);

    let defaults = config::load_defaults(args.config.as_deref())?;
    let text = render_payload(&args.payload, &defaults)?;
    let stdout = std::io::stdout();
    output::write_lines(&mut stdout.lock(), &text)
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Normalize the payload, derive tags, and render the `key=value` lines.
fn render_payload(raw: &str, defaults: &BuildDefaults) -> Result<String, ParamsError> {
    let bundle = ArgBundle::from_payload_str(raw, defaults)?;
    let suffixes = tags::suffixes(bundle.variants_or(&defaults.variants));
    let tags = tags::derive_tags(&defaults.organizations, &bundle.repo, &bundle.tag, &suffixes);
    tracing::info!(
        filename = %bundle.filename,
        repo = %bundle.repo,
        tag = %bundle.tag,
        tags = tags.len(),
        "resolved image build parameters"
    );
    Ok(output::render_lines(&bundle, &tags.join(",")))
}
