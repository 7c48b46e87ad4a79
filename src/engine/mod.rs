pub mod dense;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EngineError {
    #[error("inference engine is not initialized")]
    NotInitialized,
    #[error("model initialization failed: {0}")]
    Init(String),
    #[error("input has {got} values, model expects {expected}")]
    InputWidth { expected: usize, got: usize },
    #[error("score buffer has {got} slots, model produces {expected}")]
    OutputWidth { expected: usize, got: usize },
    #[error("failed to load model: {0}")]
    Load(String),
}

/// Black-box classifier producing one raw score per class.
pub trait InferenceEngine {
    /// Prepares the engine for inference. Failure here is fatal for a run.
    fn initialize(&mut self) -> Result<(), EngineError>;

    fn input_width(&self) -> usize;

    fn output_width(&self) -> usize;

    /// Runs one forward pass, writing `output_width()` scores into `scores`.
    fn infer(&mut self, input: &[f32], scores: &mut [f32]) -> Result<(), EngineError>;
}
