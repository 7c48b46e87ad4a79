use serde::Serialize;

pub mod json;
pub mod text;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassStat {
    pub class: usize,
    pub support: u32,
    pub predicted: u32,
    pub recall: Option<f64>,
    pub precision: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fingerprints {
    pub dataset: String,
    pub normalization: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticLine {
    pub sample: usize,
    pub real: usize,
    pub predicted: usize,
    pub scores: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryData {
    pub tool: String,
    pub version: String,
    pub fingerprints: Option<Fingerprints>,

    pub n_samples: usize,
    pub n_features: usize,
    pub n_classes: usize,

    pub correct: u32,
    pub total: u32,
    pub accuracy: Option<f64>,

    /// Rows are real labels, columns predicted labels.
    pub matrix: Vec<Vec<u32>>,
    pub classes: Vec<ClassStat>,
    pub diagnostics: Vec<DiagnosticLine>,
}

pub fn format_f64_4(v: f64) -> String {
    format!("{:.4}", v)
}

pub fn format_scores(scores: &[f32]) -> String {
    let parts: Vec<String> = scores.iter().map(|s| format!("{:.3}", s)).collect();
    format!("[{}]", parts.join(" "))
}

pub fn format_ratio(v: Option<f64>) -> String {
    match v {
        Some(v) => format_f64_4(v),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
