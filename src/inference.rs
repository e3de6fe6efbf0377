//! Inference Engine
//!
//! Each track runs scale -> cluster distances -> soft assignment -> domain
//! mapping. The engine owns both tracks behind `Arc`s and is never mutated
//! after construction, so clones can be handed to any number of threads.

use crate::artifacts;
use crate::boost::AlignmentBooster;
use crate::config::EngineConfig;
use crate::domain::{ClusterLabel, DomainScores};
use crate::features::*;
use crate::mapping::{DerivedMapping, StaticMapping};
use crate::models::{soft_assign, ClusterModel};
use crate::scaler::StandardScaler;
use crate::{CareerError, Result};
use linfa::traits::Transformer;
use ndarray::Array1;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

fn check_widths(track: &str, scaler: &StandardScaler, model: &ClusterModel) -> Result<()> {
    if model.n_features() != scaler.n_features() {
        return Err(CareerError::Config(format!(
            "{} centroids have {} features but the scaler has {}",
            track,
            model.n_features(),
            scaler.n_features()
        )));
    }
    Ok(())
}

/// Scale, measure, soft-assign. Any shape or numeric fault is a failed prediction.
fn cluster_probabilities(
    track: &'static str,
    scaler: &StandardScaler,
    model: &ClusterModel,
    raw: Vec<f64>,
) -> Result<Array1<f64>> {
    if raw.len() != scaler.n_features() {
        tracing::error!(track, got = raw.len(), expected = scaler.n_features(), "feature width mismatch");
        return Err(CareerError::PredictionFailed);
    }

    let x = Array1::from(raw);
    let scaled = scaler.transform(x.view());
    let distances = model.transform(scaled.view());
    let probs = soft_assign(distances.view());

    if probs.len() != model.n_clusters() || !probs.iter().all(|p| p.is_finite()) {
        tracing::error!(track, ?distances, "cluster probabilities are not a valid distribution");
        return Err(CareerError::PredictionFailed);
    }

    tracing::debug!(track, ?distances, ?probs, "cluster assignment");
    Ok(probs)
}

fn track_check(
    track: &'static str,
    scaler: &StandardScaler,
    model: &ClusterModel,
    raw: Vec<f64>,
    scores: DomainScores,
) -> Result<TrackCheck> {
    let distances = model.transform(scaler.transform(Array1::from(raw.clone()).view()).view());
    let probs = cluster_probabilities(track, scaler, model, raw)?;
    Ok(TrackCheck {
        distances: distances.len(),
        probabilities: probs.len(),
        scores,
    })
}

fn finite_scores(track: &'static str, scores: DomainScores) -> Result<DomainScores> {
    if scores.is_finite() {
        Ok(scores)
    } else {
        tracing::error!(track, ?scores, "non-finite domain scores");
        Err(CareerError::PredictionFailed)
    }
}

/// Personality track: 11 traits, training-time label table
#[derive(Debug, Clone)]
pub struct PersonalityTrack {
    scaler: StandardScaler,
    model: ClusterModel,
    mapping: StaticMapping,
}

impl PersonalityTrack {
    /// Assemble the track, checking every piece against the trait order
    pub fn new(
        scaler: StandardScaler,
        model: ClusterModel,
        labels: artifacts::LabelTable,
    ) -> Result<Self> {
        scaler.expect_features(&PERSONALITY_FEATURES)?;
        check_widths("personality", &scaler, &model)?;
        let mapping = StaticMapping::new(labels, model.n_clusters())?;
        Ok(Self { scaler, model, mapping })
    }

    /// Domain probabilities for a trait vector.
    ///
    /// Mass from clusters without a canonical domain is dropped, so the
    /// result may sum to less than 1.0.
    pub fn predict(&self, traits: &PersonalityTraits) -> Result<DomainScores> {
        let probs = cluster_probabilities("personality", &self.scaler, &self.model, traits.to_vector())?;
        finite_scores("personality", self.mapping.fold(probs.view()))
    }

    /// Cluster model
    pub fn model(&self) -> &ClusterModel {
        &self.model
    }

    /// Label table
    pub fn mapping(&self) -> &StaticMapping {
        &self.mapping
    }
}

/// Reading track: 6 derived features, centroid-derived labels, boosting
#[derive(Debug, Clone)]
pub struct ReadingTrack {
    scaler: StandardScaler,
    model: ClusterModel,
    mapping: DerivedMapping,
    booster: AlignmentBooster,
}

impl ReadingTrack {
    /// Assemble the track and derive its cluster labels
    pub fn new(scaler: StandardScaler, model: ClusterModel, booster: AlignmentBooster) -> Result<Self> {
        scaler.expect_features(&READING_FEATURES)?;
        check_widths("reading", &scaler, &model)?;
        let mapping = DerivedMapping::from_centroids(model.centroids())?;
        Ok(Self { scaler, model, mapping, booster })
    }

    /// Domain probabilities for a raw survey, Mixed excluded and boosts applied
    pub fn predict(&self, survey: &SurveyResponse) -> Result<DomainScores> {
        let features = ReadingFeatures::from_survey(survey);
        tracing::debug!(?features, "reading features");

        let probs = cluster_probabilities("reading", &self.scaler, &self.model, features.to_vector())?;
        let scores = self.mapping.fold(probs.view());
        let boosted = self
            .booster
            .apply(scores, &survey.chosen_project, &survey.team_choice);
        finite_scores("reading", boosted)
    }

    /// Cluster model
    pub fn model(&self) -> &ClusterModel {
        &self.model
    }

    /// Derived labels
    pub fn mapping(&self) -> &DerivedMapping {
        &self.mapping
    }

    /// Booster
    pub fn booster(&self) -> &AlignmentBooster {
        &self.booster
    }
}

/// Read-only model context shared by every prediction
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    personality: Arc<PersonalityTrack>,
    reading: Arc<ReadingTrack>,
}

impl InferenceEngine {
    /// Create from assembled tracks
    pub fn new(personality: PersonalityTrack, reading: ReadingTrack) -> Self {
        Self {
            personality: Arc::new(personality),
            reading: Arc::new(reading),
        }
    }

    /// Load every artifact named by the config. Any failure is fatal.
    pub fn load(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        tracing::info!("Loading models from {}", config.models_dir.display());

        tracing::info!("Loading personality model...");
        let personality = PersonalityTrack::new(
            artifacts::load_scaler(&config.personality_scaler_path())?,
            artifacts::load_cluster_model(&config.personality_model_path())?,
            artifacts::load_label_table(&config.personality_mapping_path())?,
        )?;

        tracing::info!("Loading reading model...");
        let reading = ReadingTrack::new(
            artifacts::load_scaler(&config.reading_scaler_path())?,
            artifacts::load_cluster_model(&config.reading_model_path())?,
            AlignmentBooster::new(config.boost_factor),
        )?;

        let engine = Self::new(personality, reading);
        let summary = engine.summary();
        tracing::info!(
            personality_clusters = summary.personality.clusters,
            reading_clusters = summary.reading.clusters,
            reading_mapping = ?summary.reading.labels,
            "Models loaded successfully"
        );
        Ok(engine)
    }

    /// Personality track domain probabilities
    pub fn predict_personality(&self, traits: &PersonalityTraits) -> Result<DomainScores> {
        self.personality.predict(traits)
    }

    /// Reading track domain probabilities
    pub fn predict_reading(&self, survey: &SurveyResponse) -> Result<DomainScores> {
        self.reading.predict(survey)
    }

    /// Personality track
    pub fn personality(&self) -> &PersonalityTrack {
        &self.personality
    }

    /// Reading track
    pub fn reading(&self) -> &ReadingTrack {
        &self.reading
    }

    /// Push a neutral input through both tracks end to end
    pub fn smoke_check(&self) -> Result<SmokeCheck> {
        let traits = PersonalityTraits::default();
        let survey = SurveyResponse::default();
        Ok(SmokeCheck {
            personality: track_check(
                "personality",
                &self.personality.scaler,
                &self.personality.model,
                traits.to_vector(),
                self.predict_personality(&traits)?,
            )?,
            reading: track_check(
                "reading",
                &self.reading.scaler,
                &self.reading.model,
                ReadingFeatures::from_survey(&survey).to_vector(),
                self.predict_reading(&survey)?,
            )?,
        })
    }

    /// Shapes and labels of the loaded models
    pub fn summary(&self) -> EngineSummary {
        let personality = &self.personality;
        let reading = &self.reading;
        EngineSummary {
            personality: TrackSummary {
                clusters: personality.model.n_clusters(),
                features: personality.model.n_features(),
                labels: (0..personality.model.n_clusters())
                    .map(|c| {
                        let label = match personality.mapping.resolve(c) {
                            Some(domain) => domain.to_string(),
                            None => format!("unmapped ({})", personality.mapping.label(c).unwrap_or("none")),
                        };
                        (c, label)
                    })
                    .collect(),
            },
            reading: TrackSummary {
                clusters: reading.model.n_clusters(),
                features: reading.model.n_features(),
                labels: reading
                    .mapping
                    .labels()
                    .iter()
                    .enumerate()
                    .map(|(c, l): (usize, &ClusterLabel)| (c, l.to_string()))
                    .collect(),
            },
            boost_factor: reading.booster.factor(),
        }
    }
}

/// Loaded model overview
#[derive(Debug, Clone, Serialize)]
pub struct EngineSummary {
    /// Personality track
    pub personality: TrackSummary,
    /// Reading track
    pub reading: TrackSummary,
    /// Reading-track boost factor
    pub boost_factor: f64,
}

/// Result of running a neutral input through both tracks
#[derive(Debug, Clone, Serialize)]
pub struct SmokeCheck {
    /// Personality track
    pub personality: TrackCheck,
    /// Reading track
    pub reading: TrackCheck,
}

/// Output widths and scores of one track for a neutral input
#[derive(Debug, Clone, Serialize)]
pub struct TrackCheck {
    /// Distance vector width
    pub distances: usize,
    /// Probability vector width
    pub probabilities: usize,
    /// Domain scores
    pub scores: DomainScores,
}

/// One track's model overview
#[derive(Debug, Clone, Serialize)]
pub struct TrackSummary {
    /// Cluster count
    pub clusters: usize,
    /// Feature width
    pub features: usize,
    /// Resolved label per cluster
    pub labels: BTreeMap<usize, String>,
}
