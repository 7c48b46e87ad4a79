use std::path::Path;

use serde::Deserialize;

use crate::input::InputError;
use crate::input::source::open_maybe_gz;

/// Per-feature standardization statistics captured when the model was fit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NormalizationParams {
    pub mean: Vec<f32>,
    pub std: Vec<f32>,
}

impl NormalizationParams {
    #[cfg(test)]
    pub fn new(mean: Vec<f32>, std: Vec<f32>) -> Self {
        Self { mean, std }
    }

    #[cfg(test)]
    pub fn identity(n_features: usize) -> Self {
        Self {
            mean: vec![0.0; n_features],
            std: vec![1.0; n_features],
        }
    }

    pub fn len(&self) -> usize {
        self.mean.len()
    }
}

pub fn load_normalization(path: &Path) -> Result<NormalizationParams, InputError> {
    let reader = open_maybe_gz(path)?;
    let params: NormalizationParams = serde_json::from_reader(reader).map_err(|e| {
        InputError::Parse(format!(
            "normalization table {}: {e}",
            path.display()
        ))
    })?;
    Ok(params)
}
