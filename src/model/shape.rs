/// Static dimensions of an evaluation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalShape {
    pub n_features: usize,
    pub n_classes: usize,
    pub expect_samples: Option<usize>,
}

impl EvalShape {
    /// Wine recognition: 13 chemical features, 3 cultivars. The sample
    /// count is left open so subsets of the table can be evaluated.
    pub fn wine_v1() -> Self {
        Self {
            n_features: 13,
            n_classes: 3,
            expect_samples: None,
        }
    }
}
