use std::path::Path;

use crate::input::InputError;
use crate::input::source::open_maybe_gz;

#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub features: Vec<f32>,
    pub label: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub n_features: usize,
    pub samples: Vec<Sample>,
}

impl Dataset {
    pub fn new(n_features: usize, samples: Vec<Sample>) -> Self {
        Self {
            n_features,
            samples,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Reads `n_features` numeric columns followed by an integer label per line.
///
/// Fields may be separated by commas, semicolons or tabs. Blank lines and
/// lines starting with `#` are skipped. The first data line is treated as a
/// header only when none of its cells parse as numbers; a partly numeric
/// first line is a data row and must parse in full.
pub fn parse_dataset(path: &Path, n_features: usize) -> Result<Dataset, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut buf = String::new();
    let mut samples = Vec::new();
    let mut line_no = 0usize;
    let mut seen_first = false;

    loop {
        buf.clear();
        let read = reader
            .read_line(&mut buf)
            .map_err(|e| InputError::io(path, e))?;
        if read == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let cols: Vec<&str> = line.split([',', ';', '\t']).map(str::trim).collect();

        if !seen_first {
            seen_first = true;
            if looks_like_header(&cols) {
                tracing::debug!(line = line_no, "skipping dataset header");
                continue;
            }
        }

        samples.push(parse_row(&cols, n_features, line_no)?);
    }

    if samples.is_empty() {
        return Err(InputError::Parse(format!(
            "dataset {} contains no samples",
            path.display()
        )));
    }

    Ok(Dataset::new(n_features, samples))
}

fn looks_like_header(cols: &[&str]) -> bool {
    cols.iter().all(|c| c.parse::<f32>().is_err())
}

fn parse_row(cols: &[&str], n_features: usize, line_no: usize) -> Result<Sample, InputError> {
    if cols.len() != n_features + 1 {
        return Err(InputError::Parse(format!(
            "dataset line {} has {} columns, expected {} features + label",
            line_no,
            cols.len(),
            n_features
        )));
    }

    let mut features = Vec::with_capacity(n_features);
    for (idx, raw) in cols[..n_features].iter().enumerate() {
        let value = raw.parse::<f32>().map_err(|_| {
            InputError::Parse(format!(
                "dataset line {} feature {} is not a number: {:?}",
                line_no, idx, raw
            ))
        })?;
        if !value.is_finite() {
            return Err(InputError::InvalidInput(format!(
                "dataset line {} feature {} is not finite",
                line_no, idx
            )));
        }
        features.push(value);
    }

    let label = parse_label(cols[n_features]).ok_or_else(|| {
        InputError::Parse(format!(
            "dataset line {} label is not a non-negative integer: {:?}",
            line_no, cols[n_features]
        ))
    })?;

    Ok(Sample { features, label })
}

fn parse_label(raw: &str) -> Option<usize> {
    if let Ok(v) = raw.parse::<usize>() {
        return Some(v);
    }
    // exported tables sometimes carry labels as floats ("2.0")
    let v = raw.parse::<f64>().ok()?;
    if v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 {
        Some(v as usize)
    } else {
        None
    }
}
