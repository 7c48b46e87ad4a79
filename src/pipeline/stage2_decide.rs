/// Index of the largest score; the first index wins on exact ties.
///
/// Returns `None` for an empty score vector.
pub fn argmax(scores: &[f32]) -> Option<usize> {
    let (&first, rest) = scores.split_first()?;
    let mut best = 0usize;
    let mut max = first;
    for (i, &v) in rest.iter().enumerate() {
        if v > max {
            max = v;
            best = i + 1;
        }
    }
    Some(best)
}
