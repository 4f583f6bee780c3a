use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde::Serialize;

use super::{MetricsSink, SinkError};
use crate::evaluator::{EvaluationReport, ImageRecord, SkippedImage};

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Line<'a> {
    Image(&'a ImageRecord),
    Skipped(&'a SkippedImage),
    Summary(&'a EvaluationReport),
}

/// One JSON object per line: every scored or skipped image, then the
/// final summary.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(
        &mut self,
        line: &Line<'_>,
    ) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, line)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

impl JsonLinesSink<BufWriter<File>> {
    pub fn create(path: &Path) -> Result<Self, SinkError> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> MetricsSink for JsonLinesSink<W> {
    fn record_image(
        &mut self,
        record: &ImageRecord,
    ) -> Result<(), SinkError> {
        self.write_line(&Line::Image(record))
    }

    fn record_skip(
        &mut self,
        skipped: &SkippedImage,
    ) -> Result<(), SinkError> {
        self.write_line(&Line::Skipped(skipped))
    }

    fn finish(
        &mut self,
        report: &EvaluationReport,
    ) -> Result<(), SinkError> {
        self.write_line(&Line::Summary(report))?;
        self.writer.flush()?;
        Ok(())
    }
}
