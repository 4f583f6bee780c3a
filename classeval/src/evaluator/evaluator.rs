use std::time::Instant;

use tracing::{debug, info, warn};

use super::{
    EvaluationError, EvaluationReport, EvaluatorState, ImageRecord,
    LatencySummary, RunningMetrics, SkippedImage, StepOutcome,
    metrics::duration_ms,
};
use crate::{
    backend::{BackendError, InferenceBackend},
    config::{EvaluationConfig, FailurePolicy},
    dataset::{ClassLabels, ImageSource},
    postprocessing::{softmax, top_k},
    preprocessing::Preprocessor,
    sink::MetricsSink,
};

/// Number of ranked classes kept per image.
pub const TOP_K: usize = 5;

struct Stream {
    images: Vec<String>,
    ground_truth: Vec<usize>,
    labels: ClassLabels,
    cursor: usize,
}

/// Streams a validation set through preprocessing, the inference backend
/// and ranking, one image at a time and strictly in list order.
pub struct Evaluator<B: InferenceBackend, S: ImageSource> {
    backend: B,
    image_source: S,
    preprocessor: Preprocessor,
    config: EvaluationConfig,
    state: EvaluatorState,
    stream: Option<Stream>,
    metrics: RunningMetrics,
    images_skipped: usize,
}

impl<B: InferenceBackend, S: ImageSource> Evaluator<B, S> {
    pub fn new(
        backend: B,
        image_source: S,
        config: EvaluationConfig,
    ) -> Self {
        let preprocessor = Preprocessor::new(config.preprocessing.clone());
        Self {
            backend,
            image_source,
            preprocessor,
            config,
            state: EvaluatorState::Idle,
            stream: None,
            metrics: RunningMetrics::default(),
            images_skipped: 0,
        }
    }

    pub fn state(&self) -> EvaluatorState {
        self.state
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub fn metrics(&self) -> &RunningMetrics {
        &self.metrics
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Number of entries in the loaded validation list.
    pub fn images_total(&self) -> usize {
        self.stream.as_ref().map_or(0, |stream| stream.images.len())
    }

    /// Accepts the validation list and labels and starts streaming.
    pub fn load(
        &mut self,
        images: Vec<String>,
        ground_truth: Vec<usize>,
        labels: ClassLabels,
    ) -> Result<(), EvaluationError> {
        self.expect_state(EvaluatorState::Idle, "load")?;
        self.state = EvaluatorState::Loading;

        if let Err(error) = self.check_inputs(&images, &ground_truth, &labels)
        {
            self.state = EvaluatorState::Idle;
            return Err(error);
        }

        info!(
            images = images.len(),
            labels = labels.len(),
            output_channels = self.backend.output_channels(),
            "validation set loaded"
        );

        self.stream = Some(Stream {
            images,
            ground_truth,
            labels,
            cursor: 0,
        });
        self.metrics = RunningMetrics::default();
        self.images_skipped = 0;
        self.state = EvaluatorState::Streaming;
        Ok(())
    }

    /// Scores the next validation entry. Returns `None` once every entry
    /// has been consumed.
    pub fn step(&mut self) -> Result<Option<StepOutcome>, EvaluationError> {
        self.expect_state(EvaluatorState::Streaming, "step")?;
        let Some(stream) = self.stream.as_mut() else {
            return Err(EvaluationError::InvalidState {
                operation: "step",
                state: self.state,
            });
        };
        if stream.cursor >= stream.images.len() {
            return Ok(None);
        }

        // Advance before any fallible work so names and labels stay paired.
        let index = stream.cursor;
        stream.cursor += 1;
        let image = stream.images[index].clone();
        let ground_truth = stream.ground_truth[index];

        let decoded = match self.image_source.load(&image) {
            Ok(decoded) => decoded,
            Err(source) => {
                let error = EvaluationError::ImageLoad {
                    image: image.clone(),
                    source,
                };
                return self.fail_before_inference(index, image, error);
            },
        };

        let input = match self
            .preprocessor
            .preprocess(decoded, self.backend.input_shape())
        {
            Ok(input) => input,
            Err(source) => {
                let error = EvaluationError::Preprocess {
                    image: image.clone(),
                    source,
                };
                return self.fail_before_inference(index, image, error);
            },
        };

        let start = Instant::now();
        let output = self.backend.infer(&input);
        let elapsed = start.elapsed();

        let expected = self.backend.output_channels();
        let scores = match output {
            Ok(scores) if scores.len() == expected => scores,
            Ok(scores) => {
                let error = EvaluationError::Backend {
                    image: image.clone(),
                    source: BackendError::OutputSizeMismatch {
                        expected,
                        actual: scores.len(),
                    },
                };
                return self.fail(
                    index,
                    image,
                    error,
                    self.config.on_backend_error,
                );
            },
            Err(source) => {
                let error = EvaluationError::Backend {
                    image: image.clone(),
                    source,
                };
                return self.fail(
                    index,
                    image,
                    error,
                    self.config.on_backend_error,
                );
            },
        };

        let labels = match self.stream.as_ref() {
            Some(stream) => &stream.labels,
            None => {
                return Err(EvaluationError::InvalidState {
                    operation: "step",
                    state: self.state,
                });
            },
        };
        let ranked = match softmax(&scores, self.config.softmax)
            .and_then(|probabilities| top_k(&probabilities, TOP_K, labels))
        {
            Ok(ranked) => ranked,
            Err(source) => {
                let error = EvaluationError::Postprocess {
                    image: image.clone(),
                    source,
                };
                return self.fail(
                    index,
                    image,
                    error,
                    self.config.on_backend_error,
                );
            },
        };
        let ground_truth_label = labels.name(ground_truth);

        let (top1_hit, top5_hit) =
            self.metrics.update(ground_truth, &ranked, elapsed);
        let record = ImageRecord {
            index,
            image,
            ground_truth,
            ground_truth_label,
            predictions: ranked,
            elapsed_ms: duration_ms(elapsed),
            top1_hit,
            top5_hit,
            images_seen: self.metrics.images_seen,
            top1_accuracy: self.metrics.top1_accuracy().unwrap_or(0.0),
            top5_accuracy: self.metrics.top5_accuracy().unwrap_or(0.0),
        };

        debug!(
            index,
            image = %record.image,
            predicted = record.predictions[0].class_id,
            ground_truth,
            elapsed_ms = record.elapsed_ms,
            top1_accuracy = record.top1_accuracy,
            top5_accuracy = record.top5_accuracy,
            "image scored"
        );

        Ok(Some(StepOutcome::Scored(record)))
    }

    /// Drives `step` to the end of the list, forwarding every outcome to
    /// `sink`, then finalizes. `progress` receives the fraction of entries
    /// consumed and returns `false` to stop early; the report of a stopped
    /// run covers the images processed until then.
    pub fn run<F>(
        &mut self,
        sink: &mut dyn MetricsSink,
        mut progress: Option<F>,
    ) -> Result<EvaluationReport, EvaluationError>
    where
        F: FnMut(f64) -> bool,
    {
        let images_total = self.images_total();
        while let Some(outcome) = self.step()? {
            match &outcome {
                StepOutcome::Scored(record) => sink.record_image(record)?,
                StepOutcome::Skipped(skipped) => sink.record_skip(skipped)?,
            }

            if let Some(progress) = progress.as_mut() {
                let processed = outcome.index() + 1;
                if !progress(processed as f64 / images_total as f64) {
                    info!(processed, "evaluation stopped");
                    break;
                }
            }
        }

        let report = self.finalize()?;
        sink.finish(&report)?;
        Ok(report)
    }

    /// Computes the final accuracies over every image scored so far.
    pub fn finalize(&mut self) -> Result<EvaluationReport, EvaluationError> {
        self.expect_state(EvaluatorState::Streaming, "finalize")?;
        self.state = EvaluatorState::Finalized;

        let (images_total, interrupted) = match self.stream.as_ref() {
            Some(stream) => {
                (stream.images.len(), stream.cursor < stream.images.len())
            },
            None => (0, false),
        };

        let (Some(top1_accuracy), Some(top5_accuracy), Some(latency)) = (
            self.metrics.top1_accuracy(),
            self.metrics.top5_accuracy(),
            LatencySummary::from_durations(&self.metrics.elapsed),
        ) else {
            return Err(EvaluationError::NoImagesEvaluated);
        };

        let report = EvaluationReport {
            images_total,
            images_seen: self.metrics.images_seen,
            images_skipped: self.images_skipped,
            top1_correct: self.metrics.top1_correct,
            top5_correct: self.metrics.top5_correct,
            top1_accuracy,
            top5_accuracy,
            latency,
            interrupted,
        };

        info!(
            images_seen = report.images_seen,
            images_skipped = report.images_skipped,
            top1_accuracy = report.top1_accuracy,
            top5_accuracy = report.top5_accuracy,
            interrupted = report.interrupted,
            "evaluation finished"
        );

        Ok(report)
    }

    fn check_inputs(
        &self,
        images: &[String],
        ground_truth: &[usize],
        labels: &ClassLabels,
    ) -> Result<(), EvaluationError> {
        if images.is_empty() {
            return Err(EvaluationError::MissingImages);
        }
        if ground_truth.is_empty() {
            return Err(EvaluationError::MissingGroundTruth);
        }
        if labels.is_empty() {
            return Err(EvaluationError::MissingLabels);
        }
        if images.len() != ground_truth.len() {
            return Err(EvaluationError::LengthMismatch {
                images: images.len(),
                ground_truth: ground_truth.len(),
            });
        }
        if let Some((image, &class_id)) = images
            .iter()
            .zip(ground_truth.iter())
            .find(|(_, class_id)| **class_id >= labels.len())
        {
            return Err(EvaluationError::UnknownClass {
                image: image.clone(),
                class_id,
                labels: labels.len(),
            });
        }

        let channels = self.backend.output_channels();
        if channels < TOP_K {
            return Err(EvaluationError::TooFewClasses {
                channels,
                k: TOP_K,
            });
        }

        // Either side of a resized image may be the short one.
        let input_shape = self.backend.input_shape();
        let short_side = self.config.preprocessing.short_side;
        if input_shape.width > short_side || input_shape.height > short_side {
            return Err(EvaluationError::InputExceedsShortSide {
                width: input_shape.width,
                height: input_shape.height,
                short_side,
            });
        }

        if let Some(outputs) = self.backend.remaining_outputs() {
            if outputs != images.len() {
                return Err(EvaluationError::OutputCountMismatch {
                    images: images.len(),
                    outputs,
                });
            }
        }
        Ok(())
    }

    fn expect_state(
        &self,
        expected: EvaluatorState,
        operation: &'static str,
    ) -> Result<(), EvaluationError> {
        if self.state != expected {
            return Err(EvaluationError::InvalidState {
                operation,
                state: self.state,
            });
        }
        Ok(())
    }

    /// Failure of an entry that never reached the backend. When the entry is
    /// skipped the backend drops its output too, so later entries stay
    /// paired with their own outputs.
    fn fail_before_inference(
        &mut self,
        index: usize,
        image: String,
        error: EvaluationError,
    ) -> Result<Option<StepOutcome>, EvaluationError> {
        let policy = self.config.on_image_error;
        if policy == FailurePolicy::Skip {
            if let Err(source) = self.backend.skip() {
                return Err(EvaluationError::Backend {
                    image,
                    source,
                });
            }
        }
        self.fail(index, image, error, policy)
    }

    fn fail(
        &mut self,
        index: usize,
        image: String,
        error: EvaluationError,
        policy: FailurePolicy,
    ) -> Result<Option<StepOutcome>, EvaluationError> {
        match policy {
            FailurePolicy::Abort => Err(error),
            FailurePolicy::Skip => {
                warn!(index, image = %image, error = %error, "image skipped");
                self.images_skipped += 1;
                Ok(Some(StepOutcome::Skipped(SkippedImage {
                    index,
                    image,
                    reason: error.to_string(),
                })))
            },
        }
    }
}
