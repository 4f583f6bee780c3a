use super::{MetricsSink, SinkError};
use crate::evaluator::{EvaluationReport, ImageRecord, SkippedImage};

/// Forwards every call to each sink in insertion order.
#[derive(Default)]
pub struct FanOutSink<'a> {
    sinks: Vec<Box<dyn MetricsSink + 'a>>,
}

impl<'a> FanOutSink<'a> {
    pub fn new() -> Self {
        Self {
            sinks: Vec::new(),
        }
    }

    pub fn push(
        &mut self,
        sink: impl MetricsSink + 'a,
    ) {
        self.sinks.push(Box::new(sink));
    }
}

impl MetricsSink for FanOutSink<'_> {
    fn record_image(
        &mut self,
        record: &ImageRecord,
    ) -> Result<(), SinkError> {
        for sink in self.sinks.iter_mut() {
            sink.record_image(record)?;
        }
        Ok(())
    }

    fn record_skip(
        &mut self,
        skipped: &SkippedImage,
    ) -> Result<(), SinkError> {
        for sink in self.sinks.iter_mut() {
            sink.record_skip(skipped)?;
        }
        Ok(())
    }

    fn finish(
        &mut self,
        report: &EvaluationReport,
    ) -> Result<(), SinkError> {
        for sink in self.sinks.iter_mut() {
            sink.finish(report)?;
        }
        Ok(())
    }
}
