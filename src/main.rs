use anyhow::{Context, Result};
use clap::Parser;
use pytrack::{
    cli::{Cli, OutputFormat},
    Snapshot, Tracker, TrackerConfig,
};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = match &args.config {
        Some(path) => Some(TrackerConfig::from_file(path)?),
        None => None,
    };

    let mut snapshot = Snapshot::load(&args.snapshot)
        .with_context(|| format!("Failed to load snapshot {}", args.snapshot.display()))?;
    snapshot.name = args.report_name(config.as_ref(), &snapshot.name);

    let chart = config.map(|config| config.chart).unwrap_or_default();
    let tracker = Tracker::from_snapshot(snapshot).with_chart_config(chart);

    match args.format {
        OutputFormat::Text => tracker.summary(),
        OutputFormat::Json => println!("{}", tracker.report().to_json()?),
    }

    if args.wants_plot() {
        tracker
            .plot_performance(args.plot_output.as_deref())
            .context("Failed to render performance chart")?;
    }

    Ok(())
}
