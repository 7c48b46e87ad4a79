use std::path::Path;

use serde::Deserialize;

use crate::engine::{EngineError, InferenceEngine};
use crate::input::source::open_maybe_gz;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Linear,
    Relu,
    Softmax,
}

/// Fully connected layer; `weights` holds one row of input weights per output.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
    pub activation: Activation,
}

impl DenseLayer {
    fn input_width(&self) -> usize {
        self.weights.first().map_or(0, Vec::len)
    }

    fn output_width(&self) -> usize {
        self.weights.len()
    }

    fn forward(&self, input: &[f32], out: &mut Vec<f32>) {
        out.clear();
        for (row, &b) in self.weights.iter().zip(&self.bias) {
            let mut acc = b as f64;
            for (&w, &x) in row.iter().zip(input) {
                acc += w as f64 * x as f64;
            }
            out.push(acc as f32);
        }
        match self.activation {
            Activation::Linear => {}
            Activation::Relu => {
                for v in out.iter_mut() {
                    *v = v.max(0.0);
                }
            }
            Activation::Softmax => softmax_in_place(out),
        }
    }
}

/// Host-side multilayer perceptron standing in for the on-device interpreter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DenseNetwork {
    pub layers: Vec<DenseLayer>,
    #[serde(skip)]
    initialized: bool,
    #[serde(skip)]
    scratch: (Vec<f32>, Vec<f32>),
}

impl DenseNetwork {
    #[cfg(test)]
    pub fn new(layers: Vec<DenseLayer>) -> Self {
        Self {
            layers,
            initialized: false,
            scratch: (Vec::new(), Vec::new()),
        }
    }

    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let reader = open_maybe_gz(path).map_err(|e| EngineError::Load(e.to_string()))?;
        serde_json::from_reader(reader)
            .map_err(|e| EngineError::Load(format!("{}: {e}", path.display())))
    }

    fn check_topology(&self) -> Result<(), EngineError> {
        if self.layers.is_empty() {
            return Err(EngineError::Init("model has no layers".to_string()));
        }
        let mut expected_in: Option<usize> = None;
        for (idx, layer) in self.layers.iter().enumerate() {
            let width_in = layer.input_width();
            if layer.output_width() == 0 || width_in == 0 {
                return Err(EngineError::Init(format!("layer {idx} is empty")));
            }
            if let Some((row, w)) = layer
                .weights
                .iter()
                .enumerate()
                .find(|(_, w)| w.len() != width_in)
            {
                return Err(EngineError::Init(format!(
                    "layer {idx} row {row} has {} weights, expected {width_in}",
                    w.len()
                )));
            }
            if layer.bias.len() != layer.output_width() {
                return Err(EngineError::Init(format!(
                    "layer {idx} has {} biases for {} outputs",
                    layer.bias.len(),
                    layer.output_width()
                )));
            }
            if let Some(prev) = expected_in {
                if prev != width_in {
                    return Err(EngineError::Init(format!(
                        "layer {idx} takes {width_in} inputs but previous layer produces {prev}"
                    )));
                }
            }
            let finite = layer
                .weights
                .iter()
                .flatten()
                .chain(&layer.bias)
                .all(|v| v.is_finite());
            if !finite {
                return Err(EngineError::Init(format!(
                    "layer {idx} has non-finite parameters"
                )));
            }
            expected_in = Some(layer.output_width());
        }
        Ok(())
    }
}

impl InferenceEngine for DenseNetwork {
    fn initialize(&mut self) -> Result<(), EngineError> {
        self.check_topology()?;
        let widest = self
            .layers
            .iter()
            .map(DenseLayer::output_width)
            .max()
            .unwrap_or(0);
        self.scratch = (Vec::with_capacity(widest), Vec::with_capacity(widest));
        self.initialized = true;
        Ok(())
    }

    fn input_width(&self) -> usize {
        self.layers.first().map_or(0, DenseLayer::input_width)
    }

    fn output_width(&self) -> usize {
        self.layers.last().map_or(0, DenseLayer::output_width)
    }

    fn infer(&mut self, input: &[f32], scores: &mut [f32]) -> Result<(), EngineError> {
        if !self.initialized {
            return Err(EngineError::NotInitialized);
        }
        if input.len() != self.input_width() {
            return Err(EngineError::InputWidth {
                expected: self.input_width(),
                got: input.len(),
            });
        }
        if scores.len() != self.output_width() {
            return Err(EngineError::OutputWidth {
                expected: self.output_width(),
                got: scores.len(),
            });
        }

        let (cur, next) = &mut self.scratch;
        cur.clear();
        cur.extend_from_slice(input);
        for layer in &self.layers {
            layer.forward(cur.as_slice(), next);
            std::mem::swap(cur, next);
        }
        scores.copy_from_slice(cur.as_slice());
        Ok(())
    }
}

fn softmax_in_place(values: &mut [f32]) {
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mut sum = 0f64;
    for v in values.iter_mut() {
        let e = ((*v - max) as f64).exp();
        *v = e as f32;
        sum += e;
    }
    if sum > 0.0 {
        for v in values.iter_mut() {
            *v = (*v as f64 / sum) as f32;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/engine/dense.rs"]
mod tests;
