use super::*;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> std::path::PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("tinyml_evalqc_dense_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn identity_layer(n: usize, activation: Activation) -> DenseLayer {
    let mut weights = vec![vec![0.0; n]; n];
    for (i, row) in weights.iter_mut().enumerate() {
        row[i] = 1.0;
    }
    DenseLayer {
        weights,
        bias: vec![0.0; n],
        activation,
    }
}

#[test]
fn test_infer_before_initialize_fails() {
    let mut net = DenseNetwork::new(vec![identity_layer(2, Activation::Linear)]);
    let mut scores = [0.0; 2];
    assert_eq!(
        net.infer(&[1.0, 2.0], &mut scores),
        Err(EngineError::NotInitialized)
    );
}

#[test]
fn test_linear_forward_pass() {
    let layer = DenseLayer {
        weights: vec![vec![1.0, 2.0], vec![-1.0, 0.5], vec![0.0, 0.0]],
        bias: vec![0.5, 0.0, -1.0],
        activation: Activation::Linear,
    };
    let mut net = DenseNetwork::new(vec![layer]);
    net.initialize().unwrap();
    assert_eq!(net.input_width(), 2);
    assert_eq!(net.output_width(), 3);

    let mut scores = [0.0; 3];
    net.infer(&[1.0, 2.0], &mut scores).unwrap();
    assert_eq!(scores, [5.5, 0.0, -1.0]);
}

#[test]
fn test_relu_then_softmax_sums_to_one() {
    let hidden = DenseLayer {
        weights: vec![vec![1.0, 0.0], vec![0.0, -1.0]],
        bias: vec![0.0, 0.0],
        activation: Activation::Relu,
    };
    let out = DenseLayer {
        weights: vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.5, 0.5]],
        bias: vec![0.0, 0.0, 0.0],
        activation: Activation::Softmax,
    };
    let mut net = DenseNetwork::new(vec![hidden, out]);
    net.initialize().unwrap();

    let mut scores = [0.0; 3];
    net.infer(&[2.0, 3.0], &mut scores).unwrap();
    let sum: f32 = scores.iter().sum();
    assert!((sum - 1.0).abs() < 1e-6);
    // relu zeroes the second hidden unit, so class 0 dominates
    assert!(scores[0] > scores[2] && scores[2] > scores[1]);
}

#[test]
fn test_initialize_rejects_broken_chain() {
    let mut net = DenseNetwork::new(vec![
        identity_layer(3, Activation::Relu),
        identity_layer(2, Activation::Softmax),
    ]);
    match net.initialize() {
        Err(EngineError::Init(msg)) => assert!(msg.contains("layer 1")),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(
        net.infer(&[1.0, 2.0, 3.0], &mut [0.0; 2]),
        Err(EngineError::NotInitialized)
    );
}

#[test]
fn test_initialize_rejects_ragged_rows_and_bias() {
    let mut ragged = identity_layer(3, Activation::Linear);
    ragged.weights[2].pop();
    assert!(DenseNetwork::new(vec![ragged]).initialize().is_err());

    let mut short_bias = identity_layer(3, Activation::Linear);
    short_bias.bias.pop();
    assert!(DenseNetwork::new(vec![short_bias]).initialize().is_err());

    assert!(DenseNetwork::new(Vec::new()).initialize().is_err());
}

#[test]
fn test_infer_checks_widths() {
    let mut net = DenseNetwork::new(vec![identity_layer(3, Activation::Linear)]);
    net.initialize().unwrap();
    let mut scores = [0.0; 3];
    assert_eq!(
        net.infer(&[1.0], &mut scores),
        Err(EngineError::InputWidth {
            expected: 3,
            got: 1
        })
    );
    let mut short = [0.0; 2];
    assert_eq!(
        net.infer(&[1.0, 2.0, 3.0], &mut short),
        Err(EngineError::OutputWidth {
            expected: 3,
            got: 2
        })
    );
}

#[test]
fn test_load_from_json() {
    let dir = make_temp_dir();
    let path = dir.join("model.json");
    fs::write(
        &path,
        r#"{"layers":[{"weights":[[1.0,0.0],[0.0,1.0]],"bias":[0.0,0.25],"activation":"linear"}]}"#,
    )
    .unwrap();
    let mut net = DenseNetwork::load(&path).unwrap();
    net.initialize().unwrap();
    let mut scores = [0.0; 2];
    net.infer(&[0.5, 0.5], &mut scores).unwrap();
    assert_eq!(scores, [0.5, 0.75]);
}

#[test]
fn test_load_rejects_unknown_activation() {
    let dir = make_temp_dir();
    let path = dir.join("model.json");
    fs::write(
        &path,
        r#"{"layers":[{"weights":[[1.0]],"bias":[0.0],"activation":"tanh"}]}"#,
    )
    .unwrap();
    assert!(matches!(
        DenseNetwork::load(&path),
        Err(EngineError::Load(_))
    ));
}
