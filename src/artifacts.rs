//! On-disk model artifacts
//!
//! Artifacts are JSON documents exported by the training pipeline. Every
//! loader here fails with a configuration error; nothing is served from a
//! partially loaded model.

use crate::models::ClusterModel;
use crate::scaler::StandardScaler;
use crate::{CareerError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Serialized cluster model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterModelArtifact {
    /// One row per cluster
    pub centroids: Vec<Vec<f64>>,
}

/// Serialized scaler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerArtifact {
    /// Per-feature mean
    pub mean: Vec<f64>,
    /// Per-feature scale
    pub scale: Vec<f64>,
}

/// Serialized cluster -> internal label table
pub type LabelTable = BTreeMap<usize, String>;

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    tracing::debug!("Reading artifact {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|e| CareerError::Artifact {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| CareerError::Artifact {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn in_artifact<T>(path: &Path, result: Result<T>) -> Result<T> {
    result.map_err(|e| match e {
        CareerError::Config(reason) => CareerError::Artifact {
            path: path.to_path_buf(),
            reason,
        },
        other => other,
    })
}

/// Load a cluster model
pub fn load_cluster_model(path: &Path) -> Result<ClusterModel> {
    let artifact: ClusterModelArtifact = read_json(path)?;
    in_artifact(path, ClusterModel::from_rows(artifact.centroids))
}

/// Load a scaler
pub fn load_scaler(path: &Path) -> Result<StandardScaler> {
    let artifact: ScalerArtifact = read_json(path)?;
    in_artifact(path, StandardScaler::new(artifact.mean, artifact.scale))
}

/// Load a cluster -> label table
pub fn load_label_table(path: &Path) -> Result<LabelTable> {
    read_json(path)
}
