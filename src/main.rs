use anyhow::{Context, Result};
use clap::Parser;
use rasgo::cli::{Cli, OutputFormat};
use rasgo::{csv_output, AprioriSummarizer, DataFrame, ScorePredicate, SummarizerConfig};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for `--debug` or a `RUST_LOG` filter
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        EnvFilter::from_default_env()
    } else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Merge the optional config file with command-line overrides
fn build_config(args: &Cli) -> Result<SummarizerConfig> {
    let mut config = match &args.config {
        Some(path) => SummarizerConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SummarizerConfig::default(),
    };

    if !args.attributes.is_empty() {
        config.attributes = args.attributes.clone();
    }
    if let Some(column) = &args.outlier_column {
        config.outlier_column = column.clone();
    }
    if let Some(expr) = &args.predicate {
        config.predicate = ScorePredicate::from_expr(expr)?;
    }
    if let Some(support) = args.min_support {
        config.min_outlier_support = support;
    }
    if let Some(ratio) = args.min_ratio {
        config.min_risk_ratio = ratio;
    }
    if let Some(check) = args.closure {
        config.closure_check = check;
    }
    if let Some(threads) = args.threads {
        config.threads = threads;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = build_config(&args)?;
    tracing::debug!("Configuration: {:?}", config);

    let frame = DataFrame::from_csv_path(
        &args.input,
        &config.attributes,
        std::slice::from_ref(&config.outlier_column),
    )
    .with_context(|| format!("Failed to read {}", args.input.display()))?;
    tracing::info!("Loaded {} rows from {}", frame.num_rows(), args.input.display());

    let mut summarizer = AprioriSummarizer::new(config);
    let explanation = summarizer.explain(&frame)?;

    match args.format {
        OutputFormat::Text => print!("{}", explanation.to_report_string()),
        OutputFormat::Json => println!("{}", explanation.to_json()?),
        OutputFormat::Csv => print!("{}", csv_output::explanation_to_csv(&explanation)),
    }

    Ok(())
}
