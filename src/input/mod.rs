use std::path::{Path, PathBuf};

pub mod dataset;
pub mod normalization;
pub mod source;

use dataset::{Dataset, parse_dataset};
use normalization::{NormalizationParams, load_normalization};
use source::hash_file;

use crate::model::shape::EvalShape;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error: {0}")]
    Parse(String),
}

impl InputError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        InputError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Provenance of the files a run was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputFingerprints {
    pub dataset: u64,
    pub normalization: u64,
    pub model: u64,
}

#[derive(Debug, Clone)]
pub struct InputBundle {
    pub dataset_path: PathBuf,
    pub normalization_path: PathBuf,
    pub dataset: Dataset,
    pub normalization: NormalizationParams,
    pub fingerprints: InputFingerprints,
}

pub fn load_input(
    dataset_path: &Path,
    normalization_path: &Path,
    model_path: &Path,
    shape: &EvalShape,
) -> Result<InputBundle, InputError> {
    for (what, path) in [
        ("dataset", dataset_path),
        ("normalization table", normalization_path),
        ("model", model_path),
    ] {
        if !path.is_file() {
            return Err(InputError::MissingInput(format!(
                "{what} file {} does not exist",
                path.display()
            )));
        }
    }

    tracing::info!(
        dataset = %dataset_path.display(),
        normalization = %normalization_path.display(),
        "loading evaluation tables"
    );

    let dataset = parse_dataset(dataset_path, shape.n_features)?;
    let normalization = load_normalization(normalization_path)?;

    let fingerprints = InputFingerprints {
        dataset: hash_file(dataset_path)?,
        normalization: hash_file(normalization_path)?,
        model: hash_file(model_path)?,
    };

    tracing::info!(
        samples = dataset.len(),
        features = dataset.n_features,
        "dataset loaded"
    );

    Ok(InputBundle {
        dataset_path: dataset_path.to_path_buf(),
        normalization_path: normalization_path.to_path_buf(),
        dataset,
        normalization,
        fingerprints,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
