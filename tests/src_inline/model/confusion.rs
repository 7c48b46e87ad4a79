use super::*;

fn record_all(pairs: &[(usize, usize)], n: usize) -> ConfusionMatrix {
    let mut m = ConfusionMatrix::new(n);
    for &(real, pred) in pairs {
        m.record(real, pred);
    }
    m
}

#[test]
fn test_new_matrix_is_zeroed() {
    let m = ConfusionMatrix::new(3);
    assert_eq!(m.total(), 0);
    assert_eq!(m.correct(), 0);
    assert_eq!(m.rows(), vec![vec![0, 0, 0]; 3]);
    assert_eq!(m.accuracy(), None);
}

#[test]
fn test_record_increments_single_cell() {
    let mut m = ConfusionMatrix::new(3);
    m.record(2, 1);
    assert_eq!(m.get(2, 1), 1);
    assert_eq!(m.total(), 1);
    assert_eq!(m.correct(), 0);
    m.record(1, 1);
    assert_eq!(m.get(1, 1), 1);
    assert_eq!(m.correct(), 1);
}

#[test]
fn test_sum_equals_calls_regardless_of_order() {
    let pairs = [
        (0, 0),
        (0, 2),
        (1, 1),
        (2, 1),
        (2, 2),
        (1, 0),
        (0, 0),
        (2, 2),
    ];
    let forward = record_all(&pairs, 3);
    let mut reversed_pairs = pairs.to_vec();
    reversed_pairs.reverse();
    let reversed = record_all(&reversed_pairs, 3);
    let mut rotated_pairs = pairs.to_vec();
    rotated_pairs.rotate_left(3);
    let rotated = record_all(&rotated_pairs, 3);

    assert_eq!(forward.total(), pairs.len() as u32);
    assert_eq!(forward, reversed);
    assert_eq!(forward, rotated);
}

#[test]
fn test_correct_count_matches_trace() {
    let m = record_all(&[(0, 0), (1, 2), (2, 2), (1, 1), (0, 1), (2, 2)], 3);
    assert_eq!(m.correct(), m.trace());
    assert_eq!(m.correct(), 4);
}

#[test]
fn test_end_to_end_one_misclassification() {
    let m = record_all(&[(0, 0), (1, 1), (2, 1)], 3);
    assert_eq!(m.rows(), vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 1, 0]]);
    let acc = m.accuracy().unwrap();
    assert!((acc - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_recall_and_precision() {
    let m = record_all(&[(0, 0), (1, 1), (2, 1)], 3);
    assert_eq!(m.recall(2), Some(0.0));
    assert_eq!(m.precision(1), Some(0.5));
    assert_eq!(m.precision(2), None);
    assert_eq!(m.support(0), 1);
    assert_eq!(m.predicted_count(1), 2);
}

#[test]
#[should_panic(expected = "label out of range")]
fn test_out_of_range_prediction_panics() {
    let mut m = ConfusionMatrix::new(3);
    m.record(0, 3);
}

#[test]
fn test_generalizes_to_other_class_counts() {
    let m = record_all(&[(4, 4), (3, 0), (0, 4)], 5);
    assert_eq!(m.n_classes(), 5);
    assert_eq!(m.row(4), &[0, 0, 0, 0, 1]);
    assert_eq!(m.total(), 3);
    assert_eq!(m.correct(), 1);
}
