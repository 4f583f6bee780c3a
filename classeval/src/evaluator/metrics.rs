use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::postprocessing::RankedClass;

/// Counters of an evaluation run. Only scored images are counted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunningMetrics {
    pub images_seen: usize,
    pub top1_correct: usize,
    pub top5_correct: usize,
    /// Backend call duration per scored image, in processing order.
    pub elapsed: Vec<Duration>,
}

impl RunningMetrics {
    /// Counts one scored image. Returns whether the ground truth was ranked
    /// first and whether it was among the first five.
    pub fn update(
        &mut self,
        ground_truth: usize,
        ranked: &[RankedClass],
        elapsed: Duration,
    ) -> (bool, bool) {
        let top1_hit = ranked
            .first()
            .is_some_and(|entry| entry.class_id == ground_truth);
        let top5_hit =
            ranked.iter().take(5).any(|entry| entry.class_id == ground_truth);

        self.images_seen += 1;
        if top5_hit {
            self.top5_correct += 1;
            if top1_hit {
                self.top1_correct += 1;
            }
        }
        self.elapsed.push(elapsed);

        (top1_hit, top5_hit)
    }

    pub fn top1_accuracy(&self) -> Option<f64> {
        ratio(self.top1_correct, self.images_seen)
    }

    pub fn top5_accuracy(&self) -> Option<f64> {
        ratio(self.top5_correct, self.images_seen)
    }

    pub fn elapsed_ms(&self) -> Vec<f64> {
        self.elapsed.iter().map(|duration| duration_ms(*duration)).collect()
    }
}

fn ratio(
    correct: usize,
    total: usize,
) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(correct as f64 / total as f64)
}

pub(crate) fn duration_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

/// Distribution of backend call durations, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencySummary {
    pub count: usize,
    pub mean_ms: f64,
    pub std_dev_ms: Option<f64>,
    pub min_ms: f64,
    pub max_ms: f64,
    pub p50_ms: f64,
    pub p95_ms: f64,
}

impl LatencySummary {
    pub fn from_durations(durations: &[Duration]) -> Option<Self> {
        let mut data: Vec<f64> =
            durations.iter().map(|duration| duration_ms(*duration)).collect();
        let mean_ms = mean(&data)?;
        let std_dev_ms = std_dev(&data);
        data.sort_by(f64::total_cmp);

        Some(Self {
            count: data.len(),
            mean_ms,
            std_dev_ms,
            min_ms: data[0],
            max_ms: data[data.len() - 1],
            p50_ms: percentile(&data, 0.50),
            p95_ms: percentile(&data, 0.95),
        })
    }
}

fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }

    Some(data.iter().sum::<f64>() / data.len() as f64)
}

fn std_dev(data: &[f64]) -> Option<f64> {
    let n = data.len();
    if n < 2 {
        return None;
    }

    let mean = mean(data)?;

    let variance = data
        .iter()
        .map(|x| {
            let diff = x - mean;
            diff * diff
        })
        .sum::<f64>()
        / (n as f64 - 1.0);

    Some(variance.sqrt())
}

/// Nearest-rank percentile of sorted, non-empty data.
fn percentile(
    sorted: &[f64],
    fraction: f64,
) -> f64 {
    let rank = (fraction * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}
