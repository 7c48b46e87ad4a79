use crate::input::normalization::NormalizationParams;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum NormalizeError {
    #[error("normalization table has {mean} means but {std} standard deviations")]
    LengthMismatch { mean: usize, std: usize },
    #[error("normalization table covers {got} features, dataset has {expected}")]
    WidthMismatch { expected: usize, got: usize },
    #[error("standard deviation of feature {index} is {value}; must be finite and non-zero")]
    DegenerateStd { index: usize, value: f32 },
    #[error("mean of feature {index} is not finite")]
    NonFiniteMean { index: usize },
}

/// Checks the startup preconditions of [`normalize_into`] once, so the
/// per-sample path can divide without re-checking.
pub fn validate_params(
    params: &NormalizationParams,
    n_features: usize,
) -> Result<(), NormalizeError> {
    if params.mean.len() != params.std.len() {
        return Err(NormalizeError::LengthMismatch {
            mean: params.mean.len(),
            std: params.std.len(),
        });
    }
    if params.len() != n_features {
        return Err(NormalizeError::WidthMismatch {
            expected: n_features,
            got: params.len(),
        });
    }
    for (index, (&m, &s)) in params.mean.iter().zip(&params.std).enumerate() {
        if !m.is_finite() {
            return Err(NormalizeError::NonFiniteMean { index });
        }
        if s == 0.0 || !s.is_finite() {
            return Err(NormalizeError::DegenerateStd { index, value: s });
        }
    }
    Ok(())
}

/// Standard score `(x - mean) / std`, element-wise, into `out`.
#[inline]
pub fn normalize_into(x: &[f32], params: &NormalizationParams, out: &mut [f32]) {
    debug_assert_eq!(x.len(), params.len());
    debug_assert_eq!(out.len(), params.len());
    for (((o, &v), &m), &s) in out.iter_mut().zip(x).zip(&params.mean).zip(&params.std) {
        *o = (v - m) / s;
    }
}

#[cfg(test)]
pub fn normalize(x: &[f32], params: &NormalizationParams) -> Vec<f32> {
    let mut out = vec![0.0; x.len()];
    normalize_into(x, params, &mut out);
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_normalize.rs"]
mod tests;
