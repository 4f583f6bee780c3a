use crate::{
    evaluator::{EvaluationReport, ImageRecord, LatencySummary},
    postprocessing::RankedClass,
};

pub fn record(
    index: usize,
    elapsed_ms: f64,
) -> ImageRecord {
    ImageRecord {
        index,
        image: format!("image_{index}.png"),
        ground_truth: 1,
        ground_truth_label: "goldfish".to_string(),
        predictions: vec![RankedClass {
            class_id: 1,
            probability: 0.75,
            label: "goldfish".to_string(),
        }],
        elapsed_ms,
        top1_hit: true,
        top5_hit: true,
        images_seen: index + 1,
        top1_accuracy: 1.0,
        top5_accuracy: 1.0,
    }
}

pub fn report() -> EvaluationReport {
    EvaluationReport {
        images_total: 2,
        images_seen: 2,
        images_skipped: 0,
        top1_correct: 2,
        top5_correct: 2,
        top1_accuracy: 1.0,
        top5_accuracy: 1.0,
        latency: LatencySummary {
            count: 2,
            mean_ms: 2.0,
            std_dev_ms: None,
            min_ms: 1.5,
            max_ms: 2.5,
            p50_ms: 1.5,
            p95_ms: 2.5,
        },
        interrupted: false,
    }
}
