use super::{MetricsSink, SinkError};
use crate::evaluator::{EvaluationReport, ImageRecord, SkippedImage};

#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<ImageRecord>,
    pub skipped: Vec<SkippedImage>,
    pub report: Option<EvaluationReport>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed_ms(&self) -> Vec<f64> {
        self.records.iter().map(|record| record.elapsed_ms).collect()
    }
}

impl MetricsSink for MemorySink {
    fn record_image(
        &mut self,
        record: &ImageRecord,
    ) -> Result<(), SinkError> {
        self.records.push(record.clone());
        Ok(())
    }

    fn record_skip(
        &mut self,
        skipped: &SkippedImage,
    ) -> Result<(), SinkError> {
        self.skipped.push(skipped.clone());
        Ok(())
    }

    fn finish(
        &mut self,
        report: &EvaluationReport,
    ) -> Result<(), SinkError> {
        self.report = Some(report.clone());
        Ok(())
    }
}
