use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use super::{MetricsSink, SinkError};
use crate::evaluator::{EvaluationReport, ImageRecord};

/// Writes one backend latency in milliseconds per line. The file is
/// truncated on creation and flushed after every image.
pub struct LatencyFileSink {
    writer: BufWriter<File>,
}

impl LatencyFileSink {
    pub fn create(path: &Path) -> Result<Self, SinkError> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl MetricsSink for LatencyFileSink {
    fn record_image(
        &mut self,
        record: &ImageRecord,
    ) -> Result<(), SinkError> {
        writeln!(self.writer, "{}", record.elapsed_ms)?;
        self.writer.flush()?;
        Ok(())
    }

    fn finish(
        &mut self,
        _report: &EvaluationReport,
    ) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}
