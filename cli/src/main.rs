//! tracesniff: offline smell analysis of exported trace dumps.
//!
//! Loads one Jaeger-style JSON export, builds the span tree and runs the
//! configured detector suite over it. Detected issues go to stdout, one
//! line each; diagnostics go to stderr.

mod logging;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use logging::LogFormat;
use tracesniff_detectors::{DetectorSuite, NPlusOneQueryConfig, SuiteConfig};
use tracesniff_trace::{tree, Trace, TraceDocument};

#[derive(Parser)]
#[command(name = "tracesniff", about = "Detect performance smells in exported trace dumps")]
struct Cli {
    /// Path of the exported trace file (JSON, one trace per file).
    traces_path: PathBuf,

    /// Path to a TOML file with the N+1 query detector thresholds.
    /// The detector only runs when this is provided.
    #[arg(long, env = "TRACESNIFF_N_PLUS_ONE_QUERY_CFG")]
    n_plus_one_query_cfg: Option<PathBuf>,

    /// Disable the HTTP error detector (enabled by default).
    #[arg(long, env = "TRACESNIFF_NO_HTTP_ERROR_DETECTOR")]
    no_http_error_detector: bool,

    /// Disable the warnings detector (enabled by default).
    #[arg(long, env = "TRACESNIFF_NO_WARNINGS_DETECTOR")]
    no_warnings_detector: bool,

    /// Disable the exceptions detector (enabled by default).
    #[arg(long, env = "TRACESNIFF_NO_EXCEPTIONS_DETECTOR")]
    no_exceptions_detector: bool,

    /// Print a per-span summary of the dump instead of running detectors.
    #[arg(long)]
    explore: bool,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "TRACESNIFF_LOG_LEVEL")]
    log_level: String,

    /// Log format: "human" or "json".
    #[arg(long, default_value = "human", env = "TRACESNIFF_LOG_FORMAT")]
    log_format: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(LogFormat::parse(&cli.log_format), &cli.log_level);

    let raw = std::fs::read_to_string(&cli.traces_path)
        .with_context(|| format!("failed to read trace file {}", cli.traces_path.display()))?;

    if cli.explore {
        let document = TraceDocument::from_json(&raw)
            .with_context(|| format!("failed to parse {}", cli.traces_path.display()))?;
        print_span_table(&document);
        return Ok(());
    }

    let trace = Trace::from_json(&raw)
        .with_context(|| format!("failed to build trace from {}", cli.traces_path.display()))?;
    tracing::info!(
        "loaded trace {} with {} spans from {}",
        trace.trace_id(),
        trace.span_count(),
        cli.traces_path.display()
    );

    let suite = build_suite(&cli)?;
    tracing::debug!("running detectors: {}", suite.names().join(", "));

    let groups = suite.check_trace(&trace);
    for (name, issues) in suite.names().iter().zip(&groups) {
        tracing::debug!("{name}: {} issues", issues.len());
    }
    for issue in groups.iter().flatten() {
        println!("{issue}");
    }

    let total: usize = groups.iter().map(Vec::len).sum();
    tracing::info!("analysis complete: {total} issues found");

    Ok(())
}

/// Assemble the detector suite from CLI flags: disable flags drop the
/// simple detectors, the N+1 query detector joins when its config loads.
fn build_suite(cli: &Cli) -> anyhow::Result<DetectorSuite> {
    let n_plus_one_query = cli
        .n_plus_one_query_cfg
        .as_ref()
        .map(|path| {
            NPlusOneQueryConfig::from_toml_file(path)
                .with_context(|| format!("failed to load N+1 query config {}", path.display()))
        })
        .transpose()?;

    if let Some(config) = &n_plus_one_query {
        tracing::info!(
            "N+1 query detector enabled (duration > {}, count > {})",
            config.duration_involved_spans_thrsh,
            config.count_involved_spans_thrsh
        );
    }

    Ok(DetectorSuite::from_config(SuiteConfig {
        n_plus_one_query,
        http_errors: !cli.no_http_error_detector,
        warnings: !cli.no_warnings_detector,
        exceptions: !cli.no_exceptions_detector,
    }))
}

/// Per-span summary of a raw dump, one table per trace entry.
///
/// Works on the parsed document rather than the built tree so it stays
/// usable on dumps the tree builder would reject.
fn print_span_table(document: &TraceDocument) {
    for trace in &document.data {
        let mut child_counts: HashMap<&str, usize> = HashMap::new();
        for span in &trace.spans {
            for reference in &span.references {
                if reference.ref_type == tree::CHILD_OF {
                    *child_counts.entry(reference.span_id.as_str()).or_default() += 1;
                }
            }
        }

        println!(
            "trace {}: {} spans (total: {}, limit: {}, offset: {})",
            trace.trace_id,
            trace.spans.len(),
            document.total,
            document.limit,
            document.offset
        );
        println!(
            "{:<18} {:>10} {:>8} {:>5} {:>5} {:>8}  {}",
            "span_id", "duration", "children", "tags", "logs", "warnings", "operation_name"
        );
        for span in &trace.spans {
            println!(
                "{:<18} {:>10} {:>8} {:>5} {:>5} {:>8}  {}",
                span.span_id,
                span.duration,
                child_counts.get(span.span_id.as_str()).copied().unwrap_or(0),
                span.tags.len(),
                span.logs.len(),
                span.warnings.as_deref().map_or(0, |warnings| warnings.len()),
                span.operation_name.as_deref().unwrap_or("-")
            );
        }
    }
}
