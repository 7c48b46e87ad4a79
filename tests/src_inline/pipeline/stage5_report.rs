use super::*;
use crate::model::confusion::ConfusionMatrix;
use crate::pipeline::stage3_evaluate::SampleDiagnostic;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("tinyml_evalqc_report_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn eval_output() -> Stage3Output {
    let mut matrix = ConfusionMatrix::new(3);
    matrix.record(0, 0);
    matrix.record(1, 1);
    matrix.record(2, 1);
    Stage3Output {
        matrix,
        diagnostics: vec![SampleDiagnostic {
            index: 0,
            real: 0,
            predicted: 0,
            scores: vec![0.9, 0.05, 0.05],
        }],
    }
}

fn stage5_input<'a>(eval: &'a Stage3Output, shape: &'a EvalShape) -> Stage5Input<'a> {
    Stage5Input {
        eval,
        shape,
        n_samples: 3,
        fingerprints: Some(InputFingerprints {
            dataset: 1,
            normalization: 0xabc,
            model: u64::MAX,
        }),
        tool_name: "tinyml-evalqc".to_string(),
        tool_version: "0.0.0-test".to_string(),
    }
}

#[test]
fn test_build_summary_counts() {
    let eval = eval_output();
    let shape = EvalShape {
        n_features: 13,
        n_classes: 3,
        expect_samples: None,
    };
    let summary = build_summary(&stage5_input(&eval, &shape));
    assert_eq!(summary.correct, 2);
    assert_eq!(summary.total, 3);
    assert!((summary.accuracy.unwrap() - 2.0 / 3.0).abs() < 1e-12);
    assert_eq!(summary.matrix, vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 1, 0]]);
    assert_eq!(summary.classes.len(), 3);
    assert_eq!(summary.classes[1].precision, Some(0.5));
    assert_eq!(summary.classes[2].recall, Some(0.0));
    assert_eq!(summary.diagnostics[0].scores, vec![0.9, 0.05, 0.05]);

    let fp = summary.fingerprints.unwrap();
    assert_eq!(fp.dataset, "0000000000000001");
    assert_eq!(fp.normalization, "0000000000000abc");
    assert_eq!(fp.model, "ffffffffffffffff");
}

#[test]
fn test_write_reports_creates_files() {
    let eval = eval_output();
    let shape = EvalShape {
        n_features: 13,
        n_classes: 3,
        expect_samples: None,
    };
    let summary = build_summary(&stage5_input(&eval, &shape));
    let dir = make_temp_dir().join("nested");
    write_reports(&summary, &dir).unwrap();

    let json = fs::read_to_string(dir.join("summary.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["tool"], "tinyml-evalqc");
    assert_eq!(value["correct"], 2);
    assert_eq!(value["fingerprints"]["model"], "ffffffffffffffff");

    let text = fs::read_to_string(dir.join("report.txt")).unwrap();
    assert!(text.contains("Final accuracy: 0.6667  ( 2 / 3 )"));
    assert!(text.contains("Sample   0  Real: 0  Pred: 0  [0.900 0.050 0.050]"));
}
