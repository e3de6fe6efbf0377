//! Career Ensemble Recommender
//!
//! Recommends one of three career domains from two independent signals: a
//! personality-trait vector and a short reading-comprehension survey.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │                        CAREER ENSEMBLE                                │
//! │                                                                       │
//! │  ┌──────────────────────┐            ┌──────────────────────────────┐ │
//! │  │  Personality Track   │            │        Reading Track         │ │
//! │  │  11 traits           │            │  survey -> 6 features        │ │
//! │  │  scale -> distances  │            │  scale -> distances          │ │
//! │  │  softmax(-d)         │            │  softmax(-d)                 │ │
//! │  │  static label table  │            │  centroid-derived labels     │ │
//! │  └──────────┬───────────┘            │  alignment boost             │ │
//! │             │                        └──────────────┬───────────────┘ │
//! │  ┌──────────▼───────────────────────────────────────▼───────────────┐ │
//! │  │                ENSEMBLE  w_p * P + w_r * R  -> argmax            │ │
//! │  └──────────────────────────────────────────────────────────────────┘ │
//! └───────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Models are frozen artifacts: loaded once into an [`InferenceEngine`] and
//! only read afterwards.

#![warn(missing_docs)]

pub mod artifacts;
pub mod boost;
pub mod config;
pub mod domain;
pub mod ensemble;
pub mod features;
pub mod inference;
pub mod mapping;
pub mod models;
pub mod scaler;

use std::path::PathBuf;
use thiserror::Error;

pub use boost::AlignmentBooster;
pub use config::EngineConfig;
pub use domain::{ClusterLabel, Domain, DomainScores};
pub use ensemble::{combine, EnsemblePredictor, EnsembleWeights, PredictionRequest, PredictionResult};
pub use features::{PersonalityTraits, ReadingFeatures, SurveyResponse};
pub use inference::{InferenceEngine, PersonalityTrack, ReadingTrack};
pub use mapping::{DerivedMapping, StaticMapping};
pub use models::{soft_assign, ClusterModel};
pub use scaler::StandardScaler;

/// Career ensemble error types
#[derive(Debug, Error)]
pub enum CareerError {
    /// Invalid configuration or model shape
    #[error("configuration error: {0}")]
    Config(String),
    /// Artifact missing or malformed
    #[error("artifact error: {path:?}: {reason}")]
    Artifact {
        /// Artifact file
        path: PathBuf,
        /// What went wrong
        reason: String,
    },
    /// Filesystem failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON encode/decode failure
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// Opaque failure of a single prediction
    #[error("prediction failed")]
    PredictionFailed,
}

/// Result alias
pub type Result<T> = std::result::Result<T, CareerError>;
