use super::*;

fn params(mean: &[f32], std: &[f32]) -> NormalizationParams {
    NormalizationParams::new(mean.to_vec(), std.to_vec())
}

#[test]
fn test_normalize_elementwise() {
    let p = params(&[1.0, 10.0, -2.0], &[2.0, 5.0, 0.5]);
    assert_eq!(normalize(&[3.0, 0.0, -2.0], &p), vec![1.0, -2.0, 0.0]);
}

#[test]
fn test_identity_params_leave_vector_unchanged() {
    let p = NormalizationParams::identity(4);
    let x = [0.0f32, -1.5, 2.25, 100.0];
    assert_eq!(normalize(&x, &p), x.to_vec());

    let zeros = normalize(&[5.0, 5.0], &params(&[5.0, 5.0], &[3.0, 7.0]));
    assert_eq!(zeros, vec![0.0, 0.0]);
    assert_eq!(normalize(&zeros, &NormalizationParams::identity(2)), zeros);
}

#[test]
fn test_normalize_is_deterministic_and_linear() {
    let p = params(&[0.5, -1.0], &[0.25, 4.0]);
    let a = [1.0f32, 3.0];
    let b = [2.0f32, -5.0];
    let na = normalize(&a, &p);
    let nb = normalize(&b, &p);
    assert_eq!(na, normalize(&a, &p));
    // differences are scaled by 1/std regardless of mean
    for i in 0..2 {
        let expected = (a[i] - b[i]) / p.std[i];
        assert!((na[i] - nb[i] - expected).abs() < 1e-6);
    }
}

#[test]
fn test_validate_accepts_good_table() {
    let p = params(&[0.0, 1.0, 2.0], &[1.0, 0.5, 3.0]);
    assert_eq!(validate_params(&p, 3), Ok(()));
}

#[test]
fn test_validate_rejects_zero_std() {
    let p = params(&[0.0, 1.0], &[1.0, 0.0]);
    assert_eq!(
        validate_params(&p, 2),
        Err(NormalizeError::DegenerateStd {
            index: 1,
            value: 0.0
        })
    );
}

#[test]
fn test_validate_rejects_nan_std_and_mean() {
    let p = params(&[0.0], &[f32::NAN]);
    assert!(matches!(
        validate_params(&p, 1),
        Err(NormalizeError::DegenerateStd { index: 0, .. })
    ));
    let p = params(&[f32::INFINITY], &[1.0]);
    assert_eq!(
        validate_params(&p, 1),
        Err(NormalizeError::NonFiniteMean { index: 0 })
    );
}

#[test]
fn test_validate_rejects_shape_mismatch() {
    let p = params(&[0.0, 1.0], &[1.0]);
    assert_eq!(
        validate_params(&p, 2),
        Err(NormalizeError::LengthMismatch { mean: 2, std: 1 })
    );
    let p = NormalizationParams::identity(12);
    assert_eq!(
        validate_params(&p, 13),
        Err(NormalizeError::WidthMismatch {
            expected: 13,
            got: 12
        })
    );
}
