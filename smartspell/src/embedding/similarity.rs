//! Cosine similarity and distance between embedding vectors.

/// Euclidean length of a vector.
#[inline]
pub fn norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

#[inline]
fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[inline]
fn similarity_with_norm(a: &[f32], norm_a: f32, b: &[f32]) -> f32 {
    let norm_b = norm(b);

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    // NaN components must survive the clamp so callers can filter them.
    let sim = dot(a, b) / (norm_a * norm_b);
    if sim.is_nan() {
        sim
    } else {
        sim.clamp(-1.0, 1.0)
    }
}

/// Cosine similarity in [-1, 1]. A zero vector on either side yields 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    similarity_with_norm(a, norm(a), b)
}

/// Cosine similarity between `target` and each of `others`, in order.
pub fn cosine_similarities(target: &[f32], others: &[&[f32]]) -> Vec<f32> {
    let target_norm = norm(target);

    others
        .iter()
        .map(|other| similarity_with_norm(target, target_norm, other))
        .collect()
}

/// Cosine distance (`1 - similarity`, in [0, 2]) between `target` and each
/// of `others`, in order.
pub fn cosine_distances(target: &[f32], others: &[&[f32]]) -> Vec<f32> {
    cosine_similarities(target, others)
        .into_iter()
        .map(|sim| 1.0 - sim)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn identical_and_orthogonal() {
        let a = [1.0, 2.0, 3.0];
        let b = [-2.0, 1.0, 0.0];

        assert!(close(cosine_similarity(&a, &a), 1.0));
        assert!(close(cosine_similarity(&a, &b), 0.0));

        let d = cosine_distances(&a, &[&a, &b]);
        assert!(close(d[0], 0.0));
        assert!(close(d[1], 1.0));
    }

    #[test]
    fn opposite_is_two() {
        let a = [0.5, -0.5];
        let b = [-0.5, 0.5];
        assert!(close(cosine_distances(&a, &[&b])[0], 2.0));
    }

    #[test]
    fn zero_vector_is_neutral() {
        let a = [0.3, 0.4];
        let zero = [0.0, 0.0];

        assert_eq!(cosine_similarity(&a, &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &a), 0.0);
        assert_eq!(cosine_distances(&zero, &[&a, &zero]), vec![1.0, 1.0]);
    }

    #[test]
    fn nan_propagates() {
        let a = [1.0, 0.0];
        let b = [f32::NAN, 1.0];
        assert!(cosine_distances(&a, &[&b])[0].is_nan());
    }

    #[test]
    fn batched_matches_single() {
        let target = [0.1, 0.7, -0.2];
        let others: [&[f32]; 3] = [&[0.3, 0.1, 0.9], &[0.0, 1.0, 0.0], &[-0.1, -0.7, 0.2]];

        let batched = cosine_similarities(&target, &others);
        for (other, sim) in others.iter().zip(batched) {
            assert!(close(cosine_similarity(&target, other), sim));
        }
    }
}
