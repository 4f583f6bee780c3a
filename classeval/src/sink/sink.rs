use super::SinkError;
use crate::evaluator::{EvaluationReport, ImageRecord, SkippedImage};

/// Append-only destination for evaluation output. Calls arrive in
/// validation-list order; `finish` is called once, after the last image.
pub trait MetricsSink {
    fn record_image(
        &mut self,
        record: &ImageRecord,
    ) -> Result<(), SinkError>;

    fn record_skip(
        &mut self,
        _skipped: &SkippedImage,
    ) -> Result<(), SinkError> {
        Ok(())
    }

    fn finish(
        &mut self,
        _report: &EvaluationReport,
    ) -> Result<(), SinkError> {
        Ok(())
    }
}

impl<T: MetricsSink + ?Sized> MetricsSink for &mut T {
    fn record_image(
        &mut self,
        record: &ImageRecord,
    ) -> Result<(), SinkError> {
        (**self).record_image(record)
    }

    fn record_skip(
        &mut self,
        skipped: &SkippedImage,
    ) -> Result<(), SinkError> {
        (**self).record_skip(skipped)
    }

    fn finish(
        &mut self,
        report: &EvaluationReport,
    ) -> Result<(), SinkError> {
        (**self).finish(report)
    }
}
