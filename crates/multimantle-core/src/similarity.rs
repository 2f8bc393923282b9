//! Vector arithmetic and cosine similarity.
//!
//! Pure functions over `f32` word vectors. All accumulation happens in
//! `f64` so that scores are stable regardless of component order.
//!
//! # Score units
//!
//! [`cosine_similarity`] returns a value in [-1, 1]. Players see
//! [`similarity_score`], the same value scaled by 100.

/// Euclidean norm of a vector.
pub fn magnitude(v: &[f32]) -> f64 {
    v.iter()
        .map(|&x| f64::from(x) * f64::from(x))
        .sum::<f64>()
        .sqrt()
}

/// Inner product of two vectors.
///
/// # Panics
///
/// Panics if the vectors differ in length. Word vectors are validated to
/// [`VECTOR_DIM`](crate::types::VECTOR_DIM) components when they leave the
/// store, so a mismatch here is a broken invariant rather than bad input.
pub fn dot(a: &[f32], b: &[f32]) -> f64 {
    assert_eq!(
        a.len(),
        b.len(),
        "dot product of vectors with different lengths"
    );
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| f64::from(x) * f64::from(y))
        .sum()
}

/// Cosine similarity of two equal-length vectors.
///
/// Returns exactly `-1.0` when either vector has zero magnitude: the
/// "maximally dissimilar" sentinel, never a division by zero.
///
/// # Example
///
/// ```
/// use multimantle_core::similarity::cosine_similarity;
///
/// let a = [1.0_f32, 0.0];
/// let b = [2.0_f32, 0.0];
/// assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-12);
/// ```
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let denom = magnitude(a) * magnitude(b);
    if denom == 0.0 {
        return -1.0;
    }
    dot(a, b) / denom
}

/// Similarity reported to players: cosine similarity scaled by 100.
pub fn similarity_score(guess: &[f32], secret: &[f32]) -> f64 {
    cosine_similarity(guess, secret) * 100.0
}

/// Component-wise sum.
pub fn plus(a: &[f32], b: &[f32]) -> Vec<f32> {
    a.iter().zip(b.iter()).map(|(x, y)| x + y).collect()
}

/// Component-wise difference `a - b`.
pub fn minus(a: &[f32], b: &[f32]) -> Vec<f32> {
    a.iter().zip(b.iter()).map(|(x, y)| x - y).collect()
}

/// Multiply every component by `k`.
pub fn scale(v: &[f32], k: f32) -> Vec<f32> {
    v.iter().map(|x| k * x).collect()
}

/// Position of `t` projected onto the line through `v1` and `v2`.
///
/// 0 lands on `v1`, 1 on `v2`. Returns `None` when `v1 == v2`, since the
/// line is then undefined.
pub fn project_along(v1: &[f32], v2: &[f32], t: &[f32]) -> Option<f64> {
    let direction = minus(v2, v1);
    let denom = dot(&direction, &direction);
    if denom == 0.0 {
        return None;
    }
    Some(dot(&minus(t, v1), &direction) / denom)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_magnitude() {
        assert!((magnitude(&[3.0, 4.0]) - 5.0).abs() < EPS);
        assert_eq!(magnitude(&[0.0, 0.0, 0.0]), 0.0);
        assert_eq!(magnitude(&[]), 0.0);
    }

    #[test]
    fn test_dot() {
        assert!((dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]) - 32.0).abs() < EPS);
    }

    #[test]
    #[should_panic(expected = "different lengths")]
    fn test_dot_length_mismatch_panics() {
        dot(&[1.0, 2.0], &[1.0]);
    }

    #[test]
    fn test_cosine_identical_and_opposite() {
        let a = [0.3_f32, -1.2, 4.0];
        let neg: Vec<f32> = a.iter().map(|x| -x).collect();
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < EPS);
        assert!((cosine_similarity(&a, &neg) + 1.0).abs() < EPS);
    }

    #[test]
    fn test_cosine_orthogonal() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < EPS);
    }

    #[test]
    fn test_cosine_zero_magnitude_sentinel() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), -1.0);
        assert_eq!(cosine_similarity(&[1.0, 1.0], &[0.0, 0.0]), -1.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[0.0, 0.0]), -1.0);
    }

    #[test]
    fn test_cosine_stays_in_range() {
        // Deterministic pseudo-random vectors.
        let mut seed = 0x2545_f491_u32;
        let mut next = || {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            (seed as f32 / u32::MAX as f32) * 2.0 - 1.0
        };
        for _ in 0..50 {
            let a: Vec<f32> = (0..300).map(|_| next()).collect();
            let b: Vec<f32> = (0..300).map(|_| next()).collect();
            let sim = cosine_similarity(&a, &b);
            assert!((-1.0..=1.0).contains(&sim), "out of range: {}", sim);
        }
    }

    #[test]
    fn test_similarity_score_is_percentage() {
        let secret = [1.0_f32, 0.0];
        let guess = [0.5_f32, 0.5];
        let expected = 100.0 / 2.0_f64.sqrt();
        assert!((similarity_score(&guess, &secret) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_vector_arithmetic() {
        assert_eq!(plus(&[1.0, 2.0], &[0.5, 0.5]), vec![1.5, 2.5]);
        assert_eq!(minus(&[1.0, 2.0], &[0.5, 0.5]), vec![0.5, 1.5]);
        assert_eq!(scale(&[1.0, -2.0], 3.0), vec![3.0, -6.0]);
    }

    #[test]
    fn test_project_along() {
        let v1 = [0.0_f32, 0.0];
        let v2 = [2.0_f32, 0.0];
        assert!((project_along(&v1, &v2, &[1.0, 5.0]).unwrap() - 0.5).abs() < EPS);
        assert!((project_along(&v1, &v2, &[4.0, 0.0]).unwrap() - 2.0).abs() < EPS);
        assert!(project_along(&v1, &v1, &[1.0, 1.0]).is_none());
    }
}
