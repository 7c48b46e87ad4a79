/// Real-label x predicted-label tally for one evaluation run.
///
/// Counts are stored row-major by real label. The only mutation path is
/// [`ConfusionMatrix::record`], which keeps the running correct count equal
/// to the diagonal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionMatrix {
    n_classes: usize,
    counts: Vec<u32>,
    correct: u32,
}

impl ConfusionMatrix {
    pub fn new(n_classes: usize) -> Self {
        Self {
            n_classes,
            counts: vec![0; n_classes * n_classes],
            correct: 0,
        }
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn record(&mut self, real: usize, predicted: usize) {
        // a flat index would silently alias an out-of-range column onto the next row
        assert!(
            real < self.n_classes && predicted < self.n_classes,
            "label out of range: real={real} predicted={predicted} n_classes={}",
            self.n_classes
        );
        self.counts[real * self.n_classes + predicted] += 1;
        if real == predicted {
            self.correct += 1;
        }
    }

    pub fn get(&self, real: usize, predicted: usize) -> u32 {
        self.counts[real * self.n_classes + predicted]
    }

    pub fn row(&self, real: usize) -> &[u32] {
        let start = real * self.n_classes;
        &self.counts[start..start + self.n_classes]
    }

    pub fn rows(&self) -> Vec<Vec<u32>> {
        (0..self.n_classes).map(|r| self.row(r).to_vec()).collect()
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn trace(&self) -> u32 {
        (0..self.n_classes).map(|i| self.get(i, i)).sum()
    }

    /// `None` until at least one sample has been recorded.
    pub fn accuracy(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        Some(self.correct as f64 / total as f64)
    }

    /// Samples whose real label is `class`.
    pub fn support(&self, class: usize) -> u32 {
        self.row(class).iter().sum()
    }

    /// Samples predicted as `class`.
    pub fn predicted_count(&self, class: usize) -> u32 {
        (0..self.n_classes).map(|r| self.get(r, class)).sum()
    }

    pub fn recall(&self, class: usize) -> Option<f64> {
        let support = self.support(class);
        if support == 0 {
            return None;
        }
        Some(self.get(class, class) as f64 / support as f64)
    }

    pub fn precision(&self, class: usize) -> Option<f64> {
        let predicted = self.predicted_count(class);
        if predicted == 0 {
            return None;
        }
        Some(self.get(class, class) as f64 / predicted as f64)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/confusion.rs"]
mod tests;
