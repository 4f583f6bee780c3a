use std::{
    fs,
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use clap::Args;
use classeval::{
    EvaluationConfig, Evaluator, InferenceBackend, InputShape, VERSION,
    backend::{DeadlineBackend, ReplayBackend},
    config::FailurePolicy,
    dataset::{DirectoryImageSource, load_class_labels, load_validation_list},
    sink::{FanOutSink, JsonLinesSink, LatencyFileSink},
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::{
    output::{ConsoleSink, summary_table},
    types::{Device, RunReport},
};

#[derive(Debug, Args)]
pub struct EvalArgs {
    /// Folder with the validation images
    #[arg(long)]
    pub images: PathBuf,
    /// Validation list, `<image> <class id>` per line [default: <images>/val.txt]
    #[arg(long)]
    pub val_list: Option<PathBuf>,
    /// Class names, one per line [default: <images>/words.txt]
    #[arg(long)]
    pub labels: Option<PathBuf>,
    /// Recorded output-layer scores, one line per validation image
    #[arg(long)]
    pub scores: PathBuf,
    /// Network input width
    #[arg(long, default_value_t = 224)]
    pub input_width: u32,
    /// Network input height
    #[arg(long, default_value_t = 224)]
    pub input_height: u32,
    /// Number of output classes
    #[arg(long, default_value_t = 1000)]
    pub channels: usize,
    /// Evaluation config in JSON
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// File receiving the inference time of every image, in milliseconds
    #[arg(long, default_value = "latency_ms.txt")]
    pub latency_output: PathBuf,
    /// Per-image records in JSON Lines
    #[arg(long)]
    pub records: Option<PathBuf>,
    /// Final report in JSON
    #[arg(long)]
    pub report: Option<PathBuf>,
    /// Stop on the first image that cannot be decoded or cropped
    #[arg(long)]
    pub abort_on_image_error: bool,
    /// Fail an inference call that takes longer than this
    #[arg(long)]
    pub timeout_ms: Option<u64>,
    /// Show a progress bar instead of per-image results
    #[arg(long, short)]
    pub quiet: bool,
    /// Debug logging
    #[arg(long, short)]
    pub verbose: bool,
}

pub fn handle_eval(args: EvalArgs) -> Result<(), Box<dyn std::error::Error>> {
    setup_logging(args.verbose)?;

    let val_list_path =
        args.val_list.clone().unwrap_or_else(|| args.images.join("val.txt"));
    let labels_path =
        args.labels.clone().unwrap_or_else(|| args.images.join("words.txt"));

    let mut config = match &args.config {
        Some(path) => EvaluationConfig::from_file(path)?,
        None => EvaluationConfig::default(),
    };
    if args.abort_on_image_error {
        config = config.on_image_error(FailurePolicy::Abort);
    }

    let labels = load_class_labels(&labels_path)?;
    let (images, ground_truth) =
        load_validation_list(&val_list_path)?.into_parts();

    let input_shape = InputShape::new(args.input_width, args.input_height);
    let replay =
        ReplayBackend::from_file(input_shape, args.channels, &args.scores)?;
    info!(
        rows = replay.remaining(),
        scores = %args.scores.display(),
        "recorded outputs loaded"
    );
    let backend: Box<dyn InferenceBackend> = match args.timeout_ms {
        Some(timeout_ms) => Box::new(DeadlineBackend::new(
            replay,
            Duration::from_millis(timeout_ms),
        )?),
        None => Box::new(replay),
    };

    let image_source = DirectoryImageSource::new(args.images.clone());
    let mut evaluator = Evaluator::new(backend, image_source, config.clone());
    evaluator.load(images, ground_truth, labels)?;
    let images_total = evaluator.images_total();

    let is_running = Arc::new(AtomicBool::new(true));
    let is_running_for_ctrlc = is_running.clone();
    ctrlc::set_handler(move || {
        is_running_for_ctrlc.store(false, Ordering::SeqCst);
    })?;

    let mut sinks = FanOutSink::new();
    if !args.quiet {
        sinks.push(ConsoleSink::new());
    }
    sinks.push(LatencyFileSink::create(&args.latency_output)?);
    if let Some(path) = &args.records {
        sinks.push(JsonLinesSink::create(path)?);
    }

    let progress_bar = if args.quiet {
        let progress_bar = ProgressBar::new(images_total as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.green} {pos}/{len} [{elapsed_precise}]")?,
        );
        Some(progress_bar)
    } else {
        None
    };

    let report = evaluator.run(
        &mut sinks,
        Some(|fraction: f64| {
            if let Some(progress_bar) = &progress_bar {
                progress_bar
                    .set_position((fraction * images_total as f64).round() as u64);
            }
            is_running.load(Ordering::SeqCst)
        }),
    )?;
    if let Some(progress_bar) = progress_bar {
        progress_bar.finish();
    }
    drop(sinks);

    println!("{}", summary_table(&report));

    if let Some(path) = &args.report {
        let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        let run_report = RunReport {
            version: VERSION.to_string(),
            timestamp,
            device: Device::current(),
            images: args.images.clone(),
            scores: args.scores.clone(),
            config,
            result: report,
        };
        fs::write(path, serde_json::to_string_pretty(&run_report)?)?;
        info!(path = %path.display(), "report saved");
    }

    Ok(())
}

fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()?;

    Ok(())
}
