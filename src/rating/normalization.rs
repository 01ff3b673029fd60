use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Rescaling applied to every new score vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    #[default]
    None,
    /// Geometric mean of the positive scores pinned to 1
    GeometricMean,
}

impl Normalization {
    pub fn apply(self, scores: Array1<f64>) -> Array1<f64> {
        match self {
            Normalization::None => scores,
            Normalization::GeometricMean => normalize_geometric_mean(scores),
        }
    }
}

/// Zero scores stay zero and are left out of the mean
fn normalize_geometric_mean(scores: Array1<f64>) -> Array1<f64> {
    match positive_geometric_mean(&scores) {
        Some(geo_mean) if geo_mean > 0.0 && geo_mean.is_finite() => scores / geo_mean,
        _ => scores,
    }
}

fn positive_geometric_mean(scores: &Array1<f64>) -> Option<f64> {
    let (log_sum, count) = scores
        .iter()
        .filter(|&&s| s > 0.0)
        .fold((0.0, 0usize), |(sum, count), &s| (sum + s.ln(), count + 1));

    if count == 0 {
        None
    } else {
        Some((log_sum / count as f64).exp())
    }
}
