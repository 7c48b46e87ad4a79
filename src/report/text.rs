use crate::report::{DiagnosticLine, SummaryData, format_ratio, format_scores};

pub fn render_sample_line(line: &DiagnosticLine) -> String {
    format!(
        "Sample {:>3}  Real: {}  Pred: {}  {}",
        line.sample,
        line.real,
        line.predicted,
        format_scores(&line.scores)
    )
}

/// Real-by-predicted table, one `Real r` row per class.
pub fn render_matrix_table(matrix: &[Vec<u32>]) -> String {
    let mut out = String::new();
    out.push_str("Confusion matrix (real vs predicted)\n");
    out.push_str("      ");
    for c in 0..matrix.len() {
        out.push_str(&format!("   {:>8}", format!("Pred{c}")));
    }
    out.push('\n');
    for (r, row) in matrix.iter().enumerate() {
        out.push_str(&format!("Real {r}"));
        for v in row {
            out.push_str(&format!("   {:>8}", v));
        }
        out.push('\n');
    }
    out
}

pub fn render_accuracy_line(data: &SummaryData) -> String {
    format!(
        "Final accuracy: {}  ( {} / {} )",
        format_ratio(data.accuracy),
        data.correct,
        data.total
    )
}

pub fn render_report_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str(&format!("{} {}\n", data.tool, data.version));
    out.push_str("==============================\n\n");

    out.push_str(&format!(
        "Samples: {}  Features: {}  Classes: {}\n",
        data.n_samples, data.n_features, data.n_classes
    ));
    if let Some(fp) = &data.fingerprints {
        out.push_str(&format!(
            "Fingerprints: dataset={} normalization={} model={}\n",
            fp.dataset, fp.normalization, fp.model
        ));
    }
    out.push('\n');

    if !data.diagnostics.is_empty() {
        out.push_str(&format!("First {} predictions\n", data.diagnostics.len()));
        for line in &data.diagnostics {
            out.push_str(&render_sample_line(line));
            out.push('\n');
        }
        out.push('\n');
    }

    out.push_str(&render_matrix_table(&data.matrix));
    out.push('\n');
    out.push_str(&render_accuracy_line(data));
    out.push_str("\n\n");

    out.push_str("Per-class\n");
    for stat in &data.classes {
        out.push_str(&format!(
            "Class {}  support: {}  predicted: {}  recall: {}  precision: {}\n",
            stat.class,
            stat.support,
            stat.predicted,
            format_ratio(stat.recall),
            format_ratio(stat.precision)
        ));
    }

    out
}
