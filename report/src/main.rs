//! pqkit-report: aggregates one experiment's stored results and prints the
//! chart series (or a summary) to stdout. Diagnostics go to the log.

mod cli;

use anyhow::{Context, Result};
use api::{DirectorySource, ResultsSource};
use clap::Parser;
use tracing::{info, warn};

use analysis::results::{design_label, export, summary_line};
use analysis::Aggregator;
use cli::{Args, OutputFormat};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    info!(
        "Starting pqkit-report v{} for experiment {}",
        env!("CARGO_PKG_VERSION"),
        args.experiment
    );

    let config = args.resolve_config().context("loading aggregation config")?;
    let source = DirectorySource::new(&args.source_dir);

    let payload = source
        .fetch_experiment_results(&args.experiment)
        .with_context(|| format!("fetching results for {}", args.experiment))?;

    let mut aggregator = Aggregator::new(config);
    if !args.no_setup {
        match source.fetch_experiment_setup(&args.experiment) {
            Ok(Some(setup)) => aggregator = aggregator.with_setup(setup),
            Ok(None) => info!("No setup.json found; records are not checked against tests"),
            Err(err) => warn!("Ignoring unreadable setup.json: {err}"),
        }
    }

    let report = aggregator.aggregate_payload(&payload);

    match args.format {
        OutputFormat::Json => println!("{}", export::to_json(&report)?),
        OutputFormat::Csv => print!("{}", export::to_csv(&report)),
        OutputFormat::Summary => {
            println!("{}", summary_line(&report.summary()));
            for test in &report.tests {
                let verdict = match test.verdict() {
                    Some(v) if v.correct => " · X identified",
                    Some(_) => " · X missed",
                    None => "",
                };
                println!(
                    "Test {}: {} · {} chart(s){verdict}",
                    test.test_number,
                    design_label(test.design),
                    test.charts.len()
                );
            }
            for diagnostic in &report.diagnostics {
                println!("  - {diagnostic}");
            }
        }
    }

    Ok(())
}
