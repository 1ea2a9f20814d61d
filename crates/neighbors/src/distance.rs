//! Cosine distance between rating rows.
//!
//! Accumulation happens in `f64`; the matrix stores `f32`.

/// Euclidean norm of a row
pub fn norm(row: &[f32]) -> f64 {
    row.iter()
        .map(|&v| {
            let v = v as f64;
            v * v
        })
        .sum::<f64>()
        .sqrt()
}

/// `1 - cos(a, b)` using precomputed norms, clamped to `[0, 2]`.
///
/// A zero-norm row has similarity 0 with every row, itself included,
/// so its distance to anything is exactly 1.
pub fn cosine_distance_with_norms(a: &[f32], b: &[f32], norm_a: f64, norm_b: f64) -> f32 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    let dot: f64 = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| x as f64 * y as f64)
        .sum();
    let similarity = dot / (norm_a * norm_b);
    (1.0 - similarity).clamp(0.0, 2.0) as f32
}

/// Cosine distance computing both norms on the fly
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    cosine_distance_with_norms(a, b, norm(a), norm(b))
}
