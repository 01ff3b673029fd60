use ndarray::Array1;

pub fn has_converged(old_scores: &Array1<f64>, new_scores: &Array1<f64>, tolerance: f64) -> bool {
    euclidean_distance(old_scores, new_scores) < tolerance
}

pub fn euclidean_distance(old_scores: &Array1<f64>, new_scores: &Array1<f64>) -> f64 {
    let diff = new_scores - old_scores;
    diff.dot(&diff).sqrt()
}

pub fn should_continue(iteration: usize, max_iterations: usize) -> bool {
    iteration < max_iterations
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_distance_is_euclidean() {
        let distance = euclidean_distance(&array![1.0, 1.0], &array![4.0, 5.0]);

        assert!((distance - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_is_strict() {
        assert!(has_converged(&array![1.0], &array![1.0005], 1e-3));
        assert!(!has_converged(&array![1.0], &array![1.5], 0.5));
    }
}
