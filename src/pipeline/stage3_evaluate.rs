use crate::engine::{EngineError, InferenceEngine};
use crate::input::dataset::Dataset;
use crate::input::normalization::NormalizationParams;
use crate::model::confusion::ConfusionMatrix;
use crate::model::layout::DiagnosticPolicy;
use crate::model::shape::EvalShape;
use crate::pipeline::stage1_normalize::{NormalizeError, normalize_into, validate_params};
use crate::pipeline::stage2_decide::argmax;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EvalError {
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("configuration needs at least one class")]
    NoClasses,
    #[error("dataset is empty; accuracy is undefined")]
    EmptyDataset,
    #[error("dataset has {got} samples, configuration expects {expected}")]
    SampleCount { expected: usize, got: usize },
    #[error("sample {sample} has {got} features, expected {expected}")]
    FeatureWidth {
        sample: usize,
        expected: usize,
        got: usize,
    },
    #[error("sample {sample} has label {label}, outside [0, {n_classes})")]
    LabelOutOfRange {
        sample: usize,
        label: usize,
        n_classes: usize,
    },
    #[error("model takes {got} inputs, configuration has {expected} features")]
    EngineInputWidth { expected: usize, got: usize },
    #[error("model produces {got} scores, configuration has {expected} classes")]
    EngineOutputWidth { expected: usize, got: usize },
    #[error("model produced non-finite scores for sample {sample}")]
    NonFiniteScores { sample: usize },
}

#[derive(Debug, Clone)]
pub struct Stage3Inputs<'a> {
    pub dataset: &'a Dataset,
    pub normalization: &'a NormalizationParams,
    pub shape: &'a EvalShape,
    pub diagnostics: DiagnosticPolicy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SampleDiagnostic {
    pub index: usize,
    pub real: usize,
    pub predicted: usize,
    pub scores: Vec<f32>,
}

#[derive(Debug, Clone)]
pub struct Stage3Output {
    pub matrix: ConfusionMatrix,
    pub diagnostics: Vec<SampleDiagnostic>,
}

impl Stage3Output {
    pub fn correct(&self) -> u32 {
        self.matrix.correct()
    }

    pub fn total(&self) -> u32 {
        self.matrix.total()
    }

    /// `None` only for a run that recorded no samples.
    pub fn accuracy(&self) -> Option<f64> {
        self.matrix.accuracy()
    }
}

/// Every configuration error is caught here, before the first sample runs.
pub fn check_preconditions(
    inputs: &Stage3Inputs<'_>,
    engine: &dyn InferenceEngine,
) -> Result<(), EvalError> {
    let shape = inputs.shape;
    if shape.n_classes == 0 {
        return Err(EvalError::NoClasses);
    }
    if inputs.dataset.is_empty() {
        return Err(EvalError::EmptyDataset);
    }
    if let Some(expected) = shape.expect_samples {
        if expected != inputs.dataset.len() {
            return Err(EvalError::SampleCount {
                expected,
                got: inputs.dataset.len(),
            });
        }
    }

    validate_params(inputs.normalization, shape.n_features)?;

    if engine.input_width() != shape.n_features {
        return Err(EvalError::EngineInputWidth {
            expected: shape.n_features,
            got: engine.input_width(),
        });
    }
    if engine.output_width() != shape.n_classes {
        return Err(EvalError::EngineOutputWidth {
            expected: shape.n_classes,
            got: engine.output_width(),
        });
    }

    for (sample, s) in inputs.dataset.samples.iter().enumerate() {
        if s.features.len() != shape.n_features {
            return Err(EvalError::FeatureWidth {
                sample,
                expected: shape.n_features,
                got: s.features.len(),
            });
        }
        if s.label >= shape.n_classes {
            return Err(EvalError::LabelOutOfRange {
                sample,
                label: s.label,
                n_classes: shape.n_classes,
            });
        }
    }

    Ok(())
}

pub fn run_stage3(
    inputs: &Stage3Inputs<'_>,
    engine: &mut dyn InferenceEngine,
) -> Result<Stage3Output, EvalError> {
    check_preconditions(inputs, &*engine)?;

    let shape = inputs.shape;
    let mut matrix = ConfusionMatrix::new(shape.n_classes);
    let mut diagnostics = Vec::with_capacity(inputs.diagnostics.sample_lines);
    let mut normalized = vec![0.0f32; shape.n_features];
    let mut scores = vec![0.0f32; shape.n_classes];

    tracing::info!(
        samples = inputs.dataset.len(),
        classes = shape.n_classes,
        "starting inference over dataset"
    );

    for (index, sample) in inputs.dataset.samples.iter().enumerate() {
        normalize_into(&sample.features, inputs.normalization, &mut normalized);
        engine.infer(&normalized, &mut scores)?;

        if scores.iter().any(|s| !s.is_finite()) {
            return Err(EvalError::NonFiniteScores { sample: index });
        }
        let Some(predicted) = argmax(&scores) else {
            return Err(EvalError::NoClasses);
        };

        matrix.record(sample.label, predicted);

        if index < inputs.diagnostics.sample_lines {
            tracing::info!(
                sample = index,
                real = sample.label,
                pred = predicted,
                scores = ?scores,
                "prediction"
            );
            diagnostics.push(SampleDiagnostic {
                index,
                real: sample.label,
                predicted,
                scores: scores.clone(),
            });
        }
    }

    debug_assert_eq!(matrix.correct(), matrix.trace());
    let out = Stage3Output {
        matrix,
        diagnostics,
    };
    tracing::info!(
        correct = out.correct(),
        total = out.total(),
        accuracy = ?out.accuracy(),
        "evaluation finished"
    );
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_evaluate.rs"]
mod tests;
