use ndarray::{ArrayViewMut1, Axis};

use super::Features;

/// Scales a row to unit euclidean length. All-zero rows stay zero.
pub(crate) fn l2_normalize(mut row: ArrayViewMut1<f32>) {
    let norm: f32 = row.iter().map(|&x| x * x).sum::<f32>().sqrt();
    if norm > 1e-10 {
        row /= norm;
    }
}

/// Scales a row so its absolute values sum to one. All-zero rows stay zero.
pub(crate) fn l1_normalize(mut row: ArrayViewMut1<f32>) {
    let norm: f32 = row.iter().map(|x| x.abs()).sum();
    if norm > 1e-10 {
        row /= norm;
    }
}

pub(crate) fn normalize_rows(features: &mut Features, normalize: fn(ArrayViewMut1<f32>)) {
    for row in features.axis_iter_mut(Axis(0)) {
        normalize(row);
    }
}
