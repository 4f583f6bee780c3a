use classeval::evaluator::EvaluationReport;
use comfy_table::{
    CellAlignment, ContentArrangement, Table, modifiers::UTF8_ROUND_CORNERS,
    presets::UTF8_FULL,
};

pub fn summary_table(report: &EvaluationReport) -> Table {
    let latency = &report.latency;
    let latency_mean = match latency.std_dev_ms {
        Some(std_dev) => format!("{:.3} ± {:.3}", latency.mean_ms, std_dev),
        None => format!("{:.3}", latency.mean_ms),
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Metric", "Value"])
        .add_row(vec![
            "Images evaluated".to_string(),
            format!("{} / {}", report.images_seen, report.images_total),
        ])
        .add_row(vec![
            "Images skipped".to_string(),
            report.images_skipped.to_string(),
        ])
        .add_row(vec![
            "Top-1 accuracy".to_string(),
            format!("{:.4}", report.top1_accuracy),
        ])
        .add_row(vec![
            "Top-5 accuracy".to_string(),
            format!("{:.4}", report.top5_accuracy),
        ])
        .add_row(vec!["Inference, ms".to_string(), latency_mean])
        .add_row(vec![
            "Inference p50 / p95, ms".to_string(),
            format!("{:.3} / {:.3}", latency.p50_ms, latency.p95_ms),
        ])
        .add_row(vec![
            "Inference min / max, ms".to_string(),
            format!("{:.3} / {:.3}", latency.min_ms, latency.max_ms),
        ]);
    if report.interrupted {
        table.add_row(vec!["Interrupted".to_string(), "yes".to_string()]);
    }
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}
