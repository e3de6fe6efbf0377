//! Cluster Models

use crate::{CareerError, Result};
use linfa::traits::Transformer;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Frozen centroid-based clustering model.
///
/// Transforms a scaled feature vector into its Euclidean distance to each
/// centroid, in cluster-index order.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterModel {
    centroids: Array2<f64>,
}

impl ClusterModel {
    /// Create from a `k x n_features` centroid matrix
    pub fn new(centroids: Array2<f64>) -> Result<Self> {
        if centroids.nrows() == 0 || centroids.ncols() == 0 {
            return Err(CareerError::Config(format!(
                "cluster model needs at least one centroid and one feature, got {}x{}",
                centroids.nrows(),
                centroids.ncols()
            )));
        }
        if centroids.iter().any(|v| !v.is_finite()) {
            return Err(CareerError::Config("cluster centroids contain non-finite values".into()));
        }
        Ok(Self { centroids })
    }

    /// Create from centroid rows
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_clusters = rows.len();
        let n_features = rows.first().map(Vec::len).unwrap_or(0);
        if let Some(i) = rows.iter().position(|r| r.len() != n_features) {
            return Err(CareerError::Config(format!(
                "centroid {} has {} features, centroid 0 has {}",
                i,
                rows[i].len(),
                n_features
            )));
        }
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let centroids = Array2::from_shape_vec((n_clusters, n_features), flat)
            .map_err(|e| CareerError::Config(format!("bad centroid matrix: {}", e)))?;
        Self::new(centroids)
    }

    /// Number of clusters (k)
    pub fn n_clusters(&self) -> usize {
        self.centroids.nrows()
    }

    /// Width of each centroid
    pub fn n_features(&self) -> usize {
        self.centroids.ncols()
    }

    /// Centroid matrix, one row per cluster
    pub fn centroids(&self) -> ArrayView2<'_, f64> {
        self.centroids.view()
    }
}

impl<'a> Transformer<ArrayView1<'a, f64>, Array1<f64>> for ClusterModel {
    /// Caller guarantees `x.len() == self.n_features()`.
    fn transform(&self, x: ArrayView1<'a, f64>) -> Array1<f64> {
        self.centroids
            .outer_iter()
            .map(|c| {
                c.iter()
                    .zip(x.iter())
                    .map(|(a, b)| (a - b).powi(2))
                    .sum::<f64>()
                    .sqrt()
            })
            .collect()
    }
}

/// Softmax over negated distances.
///
/// Closer clusters get more mass. Values are shifted by the largest negated
/// distance before exponentiating so nothing overflows.
pub fn soft_assign(distances: ArrayView1<'_, f64>) -> Array1<f64> {
    let neg = distances.mapv(|d| -d);
    let max = neg.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exp = neg.mapv(|v| (v - max).exp());
    let sum = exp.sum();
    exp / sum
}
