use classeval::{
    evaluator::{EvaluationReport, ImageRecord, SkippedImage},
    sink::{MetricsSink, SinkError},
};
use console::Style;

/// Prints the ranked classes and the running accuracies of every image.
pub struct ConsoleSink {
    style_header: Style,
    style_hit: Style,
    style_stats: Style,
    style_skip: Style,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            style_header: Style::new().bold(),
            style_hit: Style::new().green(),
            style_stats: Style::new().dim(),
            style_skip: Style::new().yellow(),
        }
    }

    fn format_record(
        &self,
        record: &ImageRecord,
    ) -> String {
        let mut lines = vec![format!(
            "{} {}",
            self.style_header.apply_to(format!("[{}]", record.index + 1)),
            self.style_header.apply_to(&record.image),
        )];
        for (rank, prediction) in record.predictions.iter().enumerate() {
            let line = format!(
                "  top[{}] prob = {:.6}  name = {}",
                rank, prediction.probability, prediction.label,
            );
            if prediction.class_id == record.ground_truth {
                lines.push(self.style_hit.apply_to(line).to_string());
            } else {
                lines.push(line);
            }
        }
        lines.push(
            self.style_stats
                .apply_to(format!(
                    "  expected {}, {:.3}ms, top1 = {:.4}, top5 = {:.4}",
                    record.ground_truth_label,
                    record.elapsed_ms,
                    record.top1_accuracy,
                    record.top5_accuracy,
                ))
                .to_string(),
        );
        lines.join("\n")
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSink for ConsoleSink {
    fn record_image(
        &mut self,
        record: &ImageRecord,
    ) -> Result<(), SinkError> {
        println!("{}", self.format_record(record));
        Ok(())
    }

    fn record_skip(
        &mut self,
        skipped: &SkippedImage,
    ) -> Result<(), SinkError> {
        println!(
            "{}",
            self.style_skip.apply_to(format!(
                "[{}] {} skipped: {}",
                skipped.index + 1,
                skipped.image,
                skipped.reason,
            ))
        );
        Ok(())
    }

    fn finish(
        &mut self,
        _report: &EvaluationReport,
    ) -> Result<(), SinkError> {
        println!();
        Ok(())
    }
}
