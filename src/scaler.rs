//! Standard-score feature scaling

use crate::{CareerError, Result};
use linfa::traits::Transformer;
use ndarray::{Array1, ArrayView1};

/// Per-feature `(x - mean) / scale` normalization fixed at training time
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    /// Create a scaler, rejecting mismatched, non-finite or zero parameters
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        if mean.is_empty() {
            return Err(CareerError::Config("scaler has no features".into()));
        }
        if mean.len() != scale.len() {
            return Err(CareerError::Config(format!(
                "scaler mean has {} features but scale has {}",
                mean.len(),
                scale.len()
            )));
        }
        if let Some(i) = mean.iter().position(|m| !m.is_finite()) {
            return Err(CareerError::Config(format!("scaler mean[{}] is not finite", i)));
        }
        if let Some(i) = scale.iter().position(|s| !s.is_finite() || *s == 0.0) {
            return Err(CareerError::Config(format!(
                "scaler scale[{}] must be finite and non-zero",
                i
            )));
        }

        Ok(Self {
            mean: Array1::from(mean),
            scale: Array1::from(scale),
        })
    }

    /// Number of features the scaler was fit on
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Fail unless the scaler matches the given feature order
    pub fn expect_features(&self, order: &[&str]) -> Result<()> {
        if self.n_features() != order.len() {
            return Err(CareerError::Config(format!(
                "scaler fit on {} features, expected {} ({})",
                self.n_features(),
                order.len(),
                order.join(", ")
            )));
        }
        Ok(())
    }

    /// Per-feature means
    pub fn mean(&self) -> ArrayView1<'_, f64> {
        self.mean.view()
    }

    /// Per-feature scales
    pub fn scale(&self) -> ArrayView1<'_, f64> {
        self.scale.view()
    }
}

impl<'a> Transformer<ArrayView1<'a, f64>, Array1<f64>> for StandardScaler {
    /// Caller guarantees `x.len() == self.n_features()`.
    fn transform(&self, x: ArrayView1<'a, f64>) -> Array1<f64> {
        (&x - &self.mean) / &self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_transform() {
        let scaler = StandardScaler::new(vec![0.5, 1.0, -2.0], vec![0.25, 2.0, 1.0]).unwrap();
        let x = array![1.0, 0.0, -2.0];
        let scaled = scaler.transform(x.view());
        assert_eq!(scaled, array![2.0, -0.5, 0.0]);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(StandardScaler::new(vec![], vec![]).is_err());
        assert!(StandardScaler::new(vec![0.0, 1.0], vec![1.0]).is_err());
        assert!(StandardScaler::new(vec![f64::NAN], vec![1.0]).is_err());
        assert!(StandardScaler::new(vec![0.0], vec![0.0]).is_err());
        assert!(StandardScaler::new(vec![0.0], vec![f64::INFINITY]).is_err());
    }

    #[test]
    fn test_feature_order_check() {
        let scaler = StandardScaler::new(vec![0.0; 3], vec![1.0; 3]).unwrap();
        assert!(scaler.expect_features(&["a", "b", "c"]).is_ok());

        let err = scaler.expect_features(&["a", "b"]).unwrap_err();
        assert!(matches!(err, CareerError::Config(_)));
    }
}
