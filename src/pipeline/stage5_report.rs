use std::fs;
use std::path::{Path, PathBuf};

use crate::input::InputFingerprints;
use crate::input::source::format_fingerprint;
use crate::model::shape::EvalShape;
use crate::pipeline::stage3_evaluate::Stage3Output;
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{ClassStat, DiagnosticLine, Fingerprints, SummaryData};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct Stage5Input<'a> {
    pub eval: &'a Stage3Output,
    pub shape: &'a EvalShape,
    pub n_samples: usize,
    pub fingerprints: Option<InputFingerprints>,
    pub tool_name: String,
    pub tool_version: String,
}

pub fn build_summary(input: &Stage5Input<'_>) -> SummaryData {
    let matrix = &input.eval.matrix;
    let classes = (0..matrix.n_classes())
        .map(|class| ClassStat {
            class,
            support: matrix.support(class),
            predicted: matrix.predicted_count(class),
            recall: matrix.recall(class),
            precision: matrix.precision(class),
        })
        .collect();

    let diagnostics = input
        .eval
        .diagnostics
        .iter()
        .map(|d| DiagnosticLine {
            sample: d.index,
            real: d.real,
            predicted: d.predicted,
            scores: d.scores.clone(),
        })
        .collect();

    SummaryData {
        tool: input.tool_name.clone(),
        version: input.tool_version.clone(),
        fingerprints: input.fingerprints.map(|fp| Fingerprints {
            dataset: format_fingerprint(fp.dataset),
            normalization: format_fingerprint(fp.normalization),
            model: format_fingerprint(fp.model),
        }),
        n_samples: input.n_samples,
        n_features: input.shape.n_features,
        n_classes: input.shape.n_classes,
        correct: input.eval.correct(),
        total: input.eval.total(),
        accuracy: input.eval.accuracy(),
        matrix: matrix.rows(),
        classes,
        diagnostics,
    }
}

/// Writes `summary.json` and `report.txt` into `out_dir`.
pub fn write_reports(summary: &SummaryData, out_dir: &Path) -> Result<(), ReportError> {
    fs::create_dir_all(out_dir).map_err(|source| ReportError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let summary_path = out_dir.join("summary.json");
    let json = render_summary_json(summary)?;
    write_text(&summary_path, &json)?;

    let report_path = out_dir.join("report.txt");
    write_text(&report_path, &render_report_text(summary))?;

    tracing::info!(dir = %out_dir.display(), "reports written");
    Ok(())
}

fn write_text(path: &Path, contents: &str) -> Result<(), ReportError> {
    fs::write(path, contents).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_report.rs"]
mod tests;
