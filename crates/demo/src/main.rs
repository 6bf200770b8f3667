// File: crates/demo/src/main.rs
// Summary: Demo loads a population dataset (built-in, TOML or wide CSV), buckets it, and
// writes the chart hand-off as JSON, CSV or a text table.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pyramid_core::{
    load_wide_csv, sample, write_chart_csv, BarWidth, BucketSpec, ChartOptions, Dataset, PyramidChart,
    PyramidConfig,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "pyramid-demo", about = "Aggregate population-by-age data into pyramid chart bars")]
struct Cli {
    /// TOML config with domain, series and bucket rules
    #[arg(long, conflicts_with = "csv")]
    config: Option<PathBuf>,

    /// Wide CSV: an `age` column plus one column per series
    #[arg(long)]
    csv: Option<PathBuf>,

    /// TOML file whose `[[buckets]]` replace the dataset's rules
    #[arg(long)]
    buckets: Option<PathBuf>,

    #[arg(long, value_enum)]
    bar_width: Option<WidthArg>,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Output file; stdout when omitted
    #[arg(long)]
    out: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Csv,
    Table,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WidthArg {
    Step,
    Span,
}

impl From<WidthArg> for BarWidth {
    fn from(w: WidthArg) -> Self {
        match w {
            WidthArg::Step => BarWidth::Step,
            WidthArg::Span => BarWidth::Span,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let (dataset, mut spec, mut opts) = load_input(&cli)?;

    if let Some(path) = &cli.buckets {
        spec = PyramidConfig::from_path(path)
            .with_context(|| format!("failed to load bucket rules '{}'", path.display()))?
            .buckets;
        info!(path = %path.display(), rules = spec.rules().len(), "using bucket rules from file");
    }
    if let Some(width) = cli.bar_width {
        opts.bar_width = width.into();
    }

    let chart = PyramidChart::build(&dataset, &spec, &opts).context("failed to build pyramid chart")?;
    info!(
        title = %chart.title,
        points = chart.series.len(),
        total = chart.series.total(),
        "aggregated population"
    );

    let text = render(&chart, cli.format)?;
    match &cli.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "wrote output");
        }
        None => print!("{text}"),
    }
    Ok(())
}

/// Resolve the dataset, its bucket rules and chart options from the CLI inputs.
/// Without inputs the built-in Europe/Africa sample and its reference rules are used.
fn load_input(cli: &Cli) -> Result<(Dataset, BucketSpec, ChartOptions)> {
    if let Some(path) = &cli.config {
        let config = PyramidConfig::from_path(path)
            .with_context(|| format!("failed to load config '{}'", path.display()))?;
        let dataset = config.dataset().with_context(|| format!("invalid dataset in '{}'", path.display()))?;
        info!(path = %path.display(), series = dataset.series.len(), "loaded config dataset");
        return Ok((dataset, config.buckets.clone(), config.chart_options()));
    }

    if let Some(path) = &cli.csv {
        let dataset = load_csv(path)?;
        info!(path = %path.display(), series = dataset.series.len(), bands = dataset.domain.count, "loaded CSV dataset");
        return Ok((dataset, BucketSpec::new(), ChartOptions::default()));
    }

    let dataset = sample::europe_africa();
    let spec = BucketSpec::reference(&dataset.domain);
    info!("using built-in Europe/Africa sample");
    Ok((dataset, spec, ChartOptions::default()))
}

fn load_csv(path: &Path) -> Result<Dataset> {
    if !path.exists() {
        anyhow::bail!("file not found: {}", path.display());
    }
    load_wide_csv(path).with_context(|| format!("failed to load CSV '{}'", path.display()))
}

fn render(chart: &PyramidChart, format: Format) -> Result<String> {
    match format {
        Format::Json => {
            let mut json = chart.to_json()?;
            json.push('\n');
            Ok(json)
        }
        Format::Csv => {
            let mut buf = Vec::new();
            write_chart_csv(&chart.series, &mut buf)?;
            Ok(String::from_utf8(buf)?)
        }
        Format::Table => Ok(render_table(chart)),
    }
}

fn render_table(chart: &PyramidChart) -> String {
    let mut out = format!("{}\n", chart.title);
    out.push_str(&format!("{:>8} {:>8} {:>14}  {}\n", "from", "to", "population", "label"));
    for p in chart.series.points() {
        out.push_str(&format!(
            "{:>8} {:>8} {:>14}  {}\n",
            p.x_start,
            p.x_end,
            p.y_end,
            p.label.unwrap_or("")
        ));
    }
    out.push_str(&format!("{:>8} {:>8} {:>14}\n", "", "total", chart.series.total()));
    let ticks = chart
        .ticks
        .iter()
        .map(|t| if t.label.is_empty() { "·".to_string() } else { t.label.clone() })
        .collect::<Vec<_>>()
        .join(" ");
    out.push_str(&format!("ticks: {ticks}\n"));
    out
}

fn init_logger(verbose: bool) {
    let default = if verbose { "pyramid_core=debug,pyramid_demo=debug,info" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
