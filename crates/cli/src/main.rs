//! `swaggen` command line: parse flags, set up logging, run one generation.

#![forbid(unsafe_code)]
#![deny(unused_must_use, missing_debug_implementations)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

use clap::Parser;
use swaggen_core::{ConverterRegistry, generate};
use tracing::error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod args;

use args::Args;

/// Crates whose events a plain `SWAGGEN_LOG` level applies to.
const LOG_TARGETS: [&str; 2] = ["swaggen", "swaggen_core"];

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            std::process::exit(code);
        }
    };

    init_tracing();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Failed to create tokio runtime: {err}");
            std::process::exit(1);
        }
    };

    std::process::exit(runtime.block_on(run(args)));
}

async fn run(args: Args) -> i32 {
    let registry = ConverterRegistry::builtin();

    if args.list_converters {
        for key in registry.keys() {
            println!("{key}");
        }
        return 0;
    }

    let Some(options) = args.into_options() else {
        eprintln!("--input, --output and --namespace are required");
        return 2;
    };

    match generate(&options, &registry).await {
        Ok(report) => {
            println!(
                "Generated {} file(s) from {} model(s) and {} api(s) into {} ({} warning(s))",
                report.files.len(),
                report.models,
                report.apis,
                options.output_folder.display(),
                report.warnings,
            );
            0
        }
        Err(err) => {
            error!(error = %err, "Generation failed.");
            eprintln!("{err}");
            1
        }
    }
}

fn init_tracing() {
    // SWAGGEN_LOG takes a plain level ("trace" .. "error") applied to the
    // swaggen crates, or a full filter spec like "swaggen_core=debug,reqwest=warn"
    let filter = match std::env::var("SWAGGEN_LOG") {
        Ok(level) if is_plain_level(&level) => level_filter(&level),
        Ok(spec) => spec,
        Err(_) => level_filter("info"),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn level_filter(level: &str) -> String {
    LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_levels() {
        assert!(is_plain_level("debug"));
        assert!(is_plain_level("WARN"));
        assert!(!is_plain_level("swaggen_core=debug"));
        assert!(!is_plain_level("verbose"));
    }

    #[test]
    fn test_level_filter_covers_both_crates() {
        assert_eq!(level_filter("debug"), "swaggen=debug,swaggen_core=debug");
    }

    #[tokio::test]
    async fn test_list_converters_exits_zero() {
        let args = Args::try_parse_from(["swaggen", "--list-converters"]).unwrap();
        assert_eq!(run(args).await, 0);
    }

    #[tokio::test]
    async fn test_unknown_converter_exits_one_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let args = Args::try_parse_from([
            "swaggen",
            "-i",
            "missing.json",
            "-o",
            out.to_str().unwrap(),
            "-n",
            "MyNs",
            "-m",
            "rust",
        ])
        .unwrap();
        assert_eq!(run(args).await, 1);
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn test_missing_document_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("nope.json");
        let args = Args::try_parse_from([
            "swaggen",
            "-i",
            input.to_str().unwrap(),
            "-o",
            dir.path().join("out").to_str().unwrap(),
            "-n",
            "MyNs",
        ])
        .unwrap();
        assert_eq!(run(args).await, 1);
    }
}
