use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use onlinerf::classifiers::{Classifier, OnlineForest};
use onlinerf::config::{AggregatorChoice, PredictorConfig};
use onlinerf::evaluation::{
    BasicEstimator, BinaryClassificationEvaluator, CurveFormat, PerformanceEvaluator,
    WindowEstimator,
};
use onlinerf::streams::{SeaFunction, SeaGenerator, Stream};
use onlinerf::tasks::PrequentialEvaluator;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Prequential evaluation of an online forest on a SEA stream.
#[derive(Parser, Debug)]
#[command(name = "onlinerf-prequential")]
#[command(version)]
struct Options {
    /// Predictor configuration (JSON); num_features is forced to the stream width
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the configuration JSON schema and exit
    #[arg(long)]
    print_schema: bool,

    /// Stream length
    #[arg(long, default_value = "100000")]
    samples: usize,

    /// Initial SEA concept (f1, f2, f3, f4)
    #[arg(long, default_value = "f1")]
    function: SeaFunction,

    /// Concept after the drift point
    #[arg(long)]
    drift_to: Option<SeaFunction>,

    /// Sample index of the concept change [default: samples / 2]
    #[arg(long, requires = "drift_to")]
    drift_at: Option<usize>,

    /// Label noise percentage
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u32).range(0..=100))]
    noise: u32,

    /// Stream seed
    #[arg(long, default_value = "1")]
    seed: u64,

    /// Samples between snapshots
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    frequency: u64,

    /// Evaluate over a sliding window of this many samples
    #[arg(long)]
    window: Option<NonZeroUsize>,

    /// Aggregator (mean, max), overrides the configuration
    #[arg(long)]
    aggregator: Option<AggregatorChoice>,

    /// Enable per-leaf drift detection
    #[arg(long)]
    drift_detection: bool,

    /// Export the learning curve to this path
    #[arg(long)]
    curve: Option<PathBuf>,

    /// Learning curve format (csv, tsv, json)
    #[arg(long, default_value = "csv")]
    format: CurveFormat,
}

impl Options {
    fn drift_position(&self) -> usize {
        self.drift_at.unwrap_or(self.samples / 2)
    }
}

/// Lets the evaluation task train the forest while `main` keeps a handle
/// for the final statistics.
struct SharedForest(Arc<OnlineForest>);

impl Classifier for SharedForest {
    fn predict_proba(&self, features: &[f64]) -> f64 {
        self.0.predict(features)
    }

    fn train_on_sample(&mut self, features: &[f64], label: bool) {
        self.0.update(features, label);
    }
}

fn build_config(opts: &Options, num_features: usize) -> Result<PredictorConfig> {
    let mut config = match &opts.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let mut value: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?;
            if let Some(map) = value.as_object_mut() {
                map.insert("num_features".into(), num_features.into());
            }
            PredictorConfig::from_json_str(&value.to_string())?
        }
        None => PredictorConfig::new(num_features),
    };
    if let Some(aggregator) = opts.aggregator {
        config.aggregator = aggregator;
    }
    if opts.drift_detection {
        config.use_drift_detection = true;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let opts = Options::parse();

    if opts.print_schema {
        println!(
            "{}",
            serde_json::to_string_pretty(&PredictorConfig::json_schema())?
        );
        return Ok(());
    }

    let mut stream = SeaGenerator::new(
        opts.function,
        false,
        opts.noise,
        Some(opts.samples),
        opts.seed,
    )?;
    if let Some(target) = opts.drift_to {
        stream = stream.with_drift(target, opts.drift_position());
    }

    let config = build_config(&opts, stream.num_features())?;
    let forest = Arc::new(OnlineForest::new(config.clone())?);

    let evaluator: Box<dyn PerformanceEvaluator> = match opts.window {
        Some(w) => Box::new(WindowedEvaluator::new(w.get())),
        None => Box::new(BinaryClassificationEvaluator::<BasicEstimator>::new()),
    };

    println!(
        "# onlinerf prequential run, {}",
        Local::now().format("%Y-%m-%d %H:%M:%S %z")
    );
    println!(
        "# stream=SEA({}{}) noise={}% samples={} seed={}",
        opts.function,
        opts.drift_to
            .map(|t| format!(" -> {t} @ {}", opts.drift_position()))
            .unwrap_or_default(),
        opts.noise,
        opts.samples,
        opts.seed
    );
    println!(
        "# trees={} aggregator={} drift_detection={} max_depth={} delta={}",
        config.num_trees,
        config.aggregator,
        config.use_drift_detection,
        config.max_depth,
        config.hoeffding_split_delta
    );

    let (tx, rx) = mpsc::channel();
    let printer = thread::spawn(move || {
        for snapshot in rx {
            println!("{snapshot}");
        }
    });

    let mut task = PrequentialEvaluator::new(
        Box::new(SharedForest(Arc::clone(&forest))),
        Box::new(stream),
        evaluator,
        None,
        None,
        opts.frequency,
    )?
    .with_progress(tx);
    task.run()?;

    let curve = task.curve().clone();
    drop(task);
    printer
        .join()
        .map_err(|_| anyhow::anyhow!("progress printer panicked"))?;

    info!(stats = %forest.stats(), "final forest");

    if let Some(path) = &opts.curve {
        curve
            .export(path, opts.format)
            .with_context(|| format!("exporting learning curve to {}", path.display()))?;
        info!(path = %path.display(), format = %opts.format, "learning curve written");
    }
    Ok(())
}

/// Sliding-window evaluator whose window size is chosen at run time.
struct WindowedEvaluator {
    window: usize,
    inner: BinaryClassificationEvaluator<WindowEstimator>,
}

impl WindowedEvaluator {
    fn new(window: usize) -> Self {
        Self {
            window,
            inner: BinaryClassificationEvaluator::with_estimators(|| WindowEstimator::new(window)),
        }
    }
}

impl PerformanceEvaluator for WindowedEvaluator {
    fn reset(&mut self) {
        *self = Self::new(self.window);
    }

    fn add_result(&mut self, label: bool, probability: f64) {
        self.inner.add_result(label, probability);
    }

    fn performance(&self) -> Vec<onlinerf::evaluation::Measurement> {
        self.inner.performance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &str) -> Result<Options, clap::Error> {
        let argv = std::iter::once("onlinerf-prequential").chain(args.split_whitespace());
        Options::try_parse_from(argv)
    }

    #[test]
    fn parses_every_option() {
        let opts = parse(
            "--samples 500 --function f2 --drift-to f4 --drift-at 100 --noise 0 \
             --seed 9 --frequency 50 --window 200 --aggregator max --drift-detection \
             --curve out.tsv --format tsv",
        )
        .unwrap();
        assert_eq!(opts.samples, 500);
        assert_eq!(opts.function, SeaFunction::F2);
        assert_eq!(opts.drift_to, Some(SeaFunction::F4));
        assert_eq!(opts.drift_position(), 100);
        assert_eq!(opts.noise, 0);
        assert_eq!(opts.seed, 9);
        assert_eq!(opts.frequency, 50);
        assert_eq!(opts.window.map(NonZeroUsize::get), Some(200));
        assert_eq!(opts.aggregator, Some(AggregatorChoice::Max));
        assert!(opts.drift_detection);
        assert_eq!(opts.curve, Some(PathBuf::from("out.tsv")));
        assert_eq!(opts.format, CurveFormat::Tsv);
    }

    #[test]
    fn defaults_without_arguments() {
        let opts = parse("").unwrap();
        assert_eq!(opts.samples, 100_000);
        assert_eq!(opts.function, SeaFunction::F1);
        assert_eq!(opts.noise, 10);
        assert_eq!(opts.frequency, 1_000);
        assert_eq!(opts.format, CurveFormat::Csv);
        assert_eq!(opts.drift_position(), 50_000);
        assert!(opts.window.is_none());
        assert!(!opts.print_schema);
    }

    #[test]
    fn help_and_errors() {
        assert_eq!(parse("--help").unwrap_err().kind(), ErrorKind::DisplayHelp);
        assert_eq!(parse("--bogus").unwrap_err().kind(), ErrorKind::UnknownArgument);
        assert!(parse("--samples").is_err());
        assert_eq!(parse("--function f9").unwrap_err().kind(), ErrorKind::ValueValidation);
        assert_eq!(parse("--format xml").unwrap_err().kind(), ErrorKind::ValueValidation);
        assert!(parse("--window 0").is_err());
        assert!(parse("--frequency 0").is_err());
        assert!(parse("--noise 101").is_err());
        assert!(parse("--drift-at 10").is_err(), "drift position without a target");
    }

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let opts = parse("--aggregator max --drift-detection").unwrap();
        let config = build_config(&opts, 3).unwrap();
        assert_eq!(config.num_features, 3);
        assert_eq!(config.aggregator, AggregatorChoice::Max);
        assert!(config.use_drift_detection);
    }
}
