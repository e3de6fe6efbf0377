//! Engine Configuration

use crate::boost::DEFAULT_BOOST_FACTOR;
use crate::ensemble::EnsembleWeights;
use crate::{CareerError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory holding the model artifacts
    pub models_dir: PathBuf,
    /// Artifact file names, relative to `models_dir`
    pub artifacts: ArtifactPaths,
    /// Default ensemble weights
    pub weights: EnsembleWeights,
    /// Additive reading-track boost per matching answer
    pub boost_factor: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from("models"),
            artifacts: ArtifactPaths::default(),
            weights: EnsembleWeights::default(),
            boost_factor: DEFAULT_BOOST_FACTOR,
        }
    }
}

impl EngineConfig {
    /// Load from file
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to file
    pub fn save(&self, path: &str) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject weights or boost values that cannot produce a distribution
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        if !self.boost_factor.is_finite() || self.boost_factor < 0.0 {
            return Err(CareerError::Config(format!(
                "boost_factor must be finite and non-negative, got {}",
                self.boost_factor
            )));
        }
        Ok(())
    }

    /// Personality cluster model path
    pub fn personality_model_path(&self) -> PathBuf {
        self.models_dir.join(&self.artifacts.personality_model)
    }

    /// Personality scaler path
    pub fn personality_scaler_path(&self) -> PathBuf {
        self.models_dir.join(&self.artifacts.personality_scaler)
    }

    /// Personality cluster -> label table path
    pub fn personality_mapping_path(&self) -> PathBuf {
        self.models_dir.join(&self.artifacts.personality_mapping)
    }

    /// Reading cluster model path
    pub fn reading_model_path(&self) -> PathBuf {
        self.models_dir.join(&self.artifacts.reading_model)
    }

    /// Reading scaler path
    pub fn reading_scaler_path(&self) -> PathBuf {
        self.models_dir.join(&self.artifacts.reading_scaler)
    }
}

/// Artifact file names
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactPaths {
    /// Personality centroids
    pub personality_model: String,
    /// Personality scaler
    pub personality_scaler: String,
    /// Personality cluster label table
    pub personality_mapping: String,
    /// Reading centroids
    pub reading_model: String,
    /// Reading scaler
    pub reading_scaler: String,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            personality_model: "career_kmeans_model.json".into(),
            personality_scaler: "scaler.json".into(),
            personality_mapping: "job_mapping.json".into(),
            reading_model: "reading_kmeans_model.json".into(),
            reading_scaler: "reading_scaler.json".into(),
        }
    }
}
