//! CLI argument parsing for the image build parameter step.
//!
//! The CLI stays thin: it only carries the JSON payload and the knobs that
//! select defaults and log verbosity.
use clap::Parser;
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "image-vars",
    version,
    about = "Normalize image build parameters and print derived tags as key=value lines",
    after_help = "Examples:\n  image-vars '{\"filename\":\"Dockerfile\",\"tag\":\"1.2.3\"}'\n  image-vars --config build-defaults.json '{\"filename\":\"Dockerfile\",\"tag\":\"v2\",\"variants\":\"slim\"}' >> \"$GITHUB_OUTPUT\"",
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// JSON object with filename, platforms, repo, tag and variants
    #[arg(value_name = "PAYLOAD")]
    pub payload: String,

    /// JSON file overriding the default platforms, repo, variants and organizations
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Emit debug logging on stderr
    #[arg(long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_payload_with_options() {
        let args = RootArgs::try_parse_from([
            "image-vars",
            "--config",
            "defaults.json",
            "--verbose",
            r#"{"filename":"Dockerfile"}"#,
        ])
        .expect("parse args");
        assert_eq!(args.payload, r#"{"filename":"Dockerfile"}"#);
        assert_eq!(args.config, Some(PathBuf::from("defaults.json")));
        assert!(args.verbose);
    }

    #[test]
    fn payload_is_required() {
        assert!(RootArgs::try_parse_from(["image-vars", "--verbose"]).is_err());
    }
}
