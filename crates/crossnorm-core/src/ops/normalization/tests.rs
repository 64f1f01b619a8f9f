//! Tests for Cross-Channel Normalization

use super::*;
use crate::tensor_view::{batch_plane, matrix_view};
use crate::{Tensor, TensorError};
use approx::assert_relative_eq;

#[test]
fn test_unit_scale_normalizes_channel_column() {
    // single location, channels [3, 4]: norm = 5
    let input = Tensor::<f32>::from_vec(vec![3.0, 4.0], &[1, 2, 1, 1]).unwrap();
    let scale = Tensor::<f32>::ones(&[2]);

    let output = channel_norm(&input, &scale, 0.0).unwrap();

    let data = output.as_slice().unwrap();
    assert_relative_eq!(data[0], 0.6, epsilon = 1e-6);
    assert_relative_eq!(data[1], 0.8, epsilon = 1e-6);
}

#[test]
fn test_per_channel_scale_applies_after_normalization() {
    let input = Tensor::<f32>::from_vec(vec![3.0, 4.0], &[1, 2, 1, 1]).unwrap();
    let scale = Tensor::<f32>::from_vec(vec![2.0, 3.0], &[2]).unwrap();

    let output = channel_norm(&input, &scale, 0.0).unwrap();

    let data = output.as_slice().unwrap();
    assert_relative_eq!(data[0], 1.2, epsilon = 1e-6);
    assert_relative_eq!(data[1], 2.4, epsilon = 1e-6);
}

#[test]
fn test_zero_column_with_epsilon_stays_zero() {
    let input = Tensor::<f32>::zeros(&[1, 2, 1, 1]);
    let scale = Tensor::<f32>::ones(&[2]);

    let output = channel_norm(&input, &scale, 1e-6).unwrap();

    for &v in output.as_slice().unwrap() {
        assert_eq!(v, 0.0);
        assert!(v.is_finite());
    }
}

#[test]
fn test_output_norm_matches_closed_form() {
    // sum_c out[c,p]^2 == sum_c scale[c]^2 x[c,p]^2 / (sum_c x[c,p]^2 + eps)
    let (batch, channels, height, width) = (2, 3, 2, 2);
    let fea_len = height * width;
    let numel = batch * channels * fea_len;
    let data: Vec<f64> = (0..numel).map(|i| ((i * 7 + 3) % 11) as f64 * 0.25 - 1.0).collect();
    let epsilon = 1e-4;

    let input = Tensor::<f64>::from_vec(data.clone(), &[batch, channels, height, width]).unwrap();
    let scale_data = vec![0.5, 1.5, 2.0];
    let scale = Tensor::<f64>::from_vec(scale_data.clone(), &[channels]).unwrap();

    let output = channel_norm(&input, &scale, epsilon).unwrap();
    let out_flat = output.as_slice().unwrap();

    for n in 0..batch {
        let x = matrix_view(batch_plane(&data, n, channels, fea_len).unwrap(), channels, fea_len)
            .unwrap();
        let y = matrix_view(
            batch_plane(out_flat, n, channels, fea_len).unwrap(),
            channels,
            fea_len,
        )
        .unwrap();
        for p in 0..fea_len {
            let sumsq: f64 = (0..channels).map(|c| x[[c, p]] * x[[c, p]]).sum();
            let expected: f64 = (0..channels)
                .map(|c| scale_data[c] * scale_data[c] * x[[c, p]] * x[[c, p]])
                .sum::<f64>()
                / (sumsq + epsilon);
            let actual: f64 = (0..channels).map(|c| y[[c, p]] * y[[c, p]]).sum();
            assert_relative_eq!(actual, expected, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_normalization_is_fixed_point_on_unit_columns() {
    // with unit scale and zero epsilon, an already-normalized tensor is
    // unchanged up to floating-point tolerance
    let input =
        Tensor::<f64>::from_vec(vec![3.0, -1.0, 4.0, 2.0, 0.5, -2.0, 1.5, 0.25], &[1, 2, 2, 2])
            .unwrap();
    let scale = Tensor::<f64>::ones(&[2]);

    let once = channel_norm(&input, &scale, 0.0).unwrap();
    let twice = channel_norm(&once, &scale, 0.0).unwrap();

    for (a, b) in once.as_slice().unwrap().iter().zip(twice.as_slice().unwrap()) {
        assert_relative_eq!(*a, *b, epsilon = 1e-12);
    }
}

#[test]
fn test_rejects_non_4d_input() {
    let input = Tensor::<f32>::zeros(&[2, 3, 4]);
    let scale = Tensor::<f32>::ones(&[3]);
    match channel_norm(&input, &scale, 1e-6) {
        Err(TensorError::InvalidShape { operation, .. }) => {
            assert_eq!(operation, "channel_norm");
        }
        other => panic!("expected InvalidShape, got {other:?}"),
    }
}

#[test]
fn test_rejects_wrong_scale_length() {
    let input = Tensor::<f32>::zeros(&[1, 3, 2, 2]);
    let scale = Tensor::<f32>::ones(&[4]);
    match channel_norm(&input, &scale, 1e-6) {
        Err(TensorError::ShapeMismatch { expected, .. }) => {
            assert!(expected.contains("[3]"));
        }
        other => panic!("expected ShapeMismatch, got {other:?}"),
    }
}

#[test]
fn test_rejects_negative_epsilon() {
    let input = Tensor::<f32>::zeros(&[1, 2, 1, 1]);
    let scale = Tensor::<f32>::ones(&[2]);
    assert!(matches!(
        channel_norm(&input, &scale, -1e-6),
        Err(TensorError::InvalidArgument { .. })
    ));
}

#[test]
fn test_rejects_zero_sized_dimension() {
    let input = Tensor::<f32>::zeros(&[0, 2, 1, 1]);
    let scale = Tensor::<f32>::ones(&[2]);
    assert!(channel_norm(&input, &scale, 1e-6).is_err());
}

#[test]
fn test_parallel_path_matches_sequential() {
    // large enough to cross the parallel threshold as a whole, while each
    // single batch element stays on the sequential path
    let (batch, channels, height, width) = (4, 8, 20, 20);
    let plane = channels * height * width;
    let data: Vec<f32> = (0..batch * plane)
        .map(|i| ((i * 17 + 5) % 97) as f32 * 0.1 - 4.0)
        .collect();
    let scale_data: Vec<f32> = (0..channels).map(|c| 0.5 + c as f32 * 0.25).collect();

    let input = Tensor::<f32>::from_vec(data.clone(), &[batch, channels, height, width]).unwrap();
    let scale = Tensor::<f32>::from_vec(scale_data, &[channels]).unwrap();

    let full = channel_norm(&input, &scale, 1e-5).unwrap();
    let full_flat = full.as_slice().unwrap();

    for n in 0..batch {
        let single = Tensor::<f32>::from_vec(
            data[n * plane..(n + 1) * plane].to_vec(),
            &[1, channels, height, width],
        )
        .unwrap();
        let single_out = channel_norm(&single, &scale, 1e-5).unwrap();
        assert_eq!(
            single_out.as_slice().unwrap(),
            &full_flat[n * plane..(n + 1) * plane]
        );
    }
}

#[test]
fn test_inputs_are_not_mutated() {
    let data = vec![3.0f32, 4.0];
    let input = Tensor::<f32>::from_vec(data.clone(), &[1, 2, 1, 1]).unwrap();
    let scale = Tensor::<f32>::from_vec(vec![2.0, 3.0], &[2]).unwrap();

    let _ = channel_norm(&input, &scale, 1e-6).unwrap();

    assert_eq!(input.as_slice().unwrap(), &data[..]);
    assert_eq!(scale.as_slice().unwrap(), &[2.0, 3.0]);
}
