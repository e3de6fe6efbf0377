//! Ensemble combination of the two tracks

use crate::domain::{Domain, DomainScores};
use crate::features::{PersonalityTraits, SurveyResponse};
use crate::inference::InferenceEngine;
use crate::{CareerError, Result};
use serde::{Deserialize, Serialize};

/// Track weights for the weighted sum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnsembleWeights {
    /// Personality track weight
    pub personality: f64,
    /// Reading track weight
    pub reading: f64,
}

impl EnsembleWeights {
    /// Create weights
    pub const fn new(personality: f64, reading: f64) -> Self {
        Self { personality, reading }
    }

    /// Weights must be finite and non-negative
    pub fn validate(&self) -> Result<()> {
        for (name, w) in [("personality", self.personality), ("reading", self.reading)] {
            if !w.is_finite() || w < 0.0 {
                return Err(CareerError::Config(format!(
                    "{} weight must be finite and non-negative, got {}",
                    name, w
                )));
            }
        }
        Ok(())
    }
}

impl Default for EnsembleWeights {
    fn default() -> Self {
        Self::new(0.5, 0.5)
    }
}

/// Weighted sum per domain and the top domain.
///
/// The top domain is the strictly highest score; equal scores resolve in
/// enumeration order (Data Science, Software Development, Tech Project
/// Management).
pub fn combine(
    personality: &DomainScores,
    reading: &DomainScores,
    weights: EnsembleWeights,
) -> (DomainScores, Domain) {
    let mut combined = DomainScores::default();
    for domain in Domain::ALL {
        combined.add(
            domain,
            weights.personality * personality.get(domain) + weights.reading * reading.get(domain),
        );
    }
    (combined, combined.best())
}

/// Final recommendation with per-track breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Recommended domain
    pub final_recommendation: Domain,
    /// Weighted combination
    pub final_scores: DomainScores,
    /// Personality track output
    pub personality_scores: DomainScores,
    /// Reading track output
    pub reading_scores: DomainScores,
}

/// Prediction request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Trait map
    #[serde(default)]
    pub personality_scores: PersonalityTraits,
    /// Raw survey
    #[serde(default)]
    pub reading_responses: SurveyResponse,
}

/// Runs both tracks and combines them
#[derive(Debug, Clone)]
pub struct EnsemblePredictor {
    engine: InferenceEngine,
    weights: EnsembleWeights,
}

impl EnsemblePredictor {
    /// Create with default weights
    pub fn new(engine: InferenceEngine) -> Self {
        Self::with_weights(engine, EnsembleWeights::default())
    }

    /// Create with custom default weights
    pub fn with_weights(engine: InferenceEngine, weights: EnsembleWeights) -> Self {
        Self { engine, weights }
    }

    /// Underlying model context
    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    /// Default weights
    pub fn weights(&self) -> EnsembleWeights {
        self.weights
    }

    /// Predict with the default weights
    pub fn predict(&self, traits: &PersonalityTraits, survey: &SurveyResponse) -> Result<PredictionResult> {
        self.predict_weighted(traits, survey, self.weights)
    }

    /// Predict with explicit weights.
    ///
    /// Negative or non-finite weights fail the prediction.
    pub fn predict_weighted(
        &self,
        traits: &PersonalityTraits,
        survey: &SurveyResponse,
        weights: EnsembleWeights,
    ) -> Result<PredictionResult> {
        if let Err(e) = weights.validate() {
            tracing::error!(?weights, error = %e, "rejecting ensemble weights");
            return Err(CareerError::PredictionFailed);
        }

        let personality_scores = self.engine.predict_personality(traits)?;
        let reading_scores = self.engine.predict_reading(survey)?;
        let (final_scores, final_recommendation) = combine(&personality_scores, &reading_scores, weights);

        if !final_scores.is_finite() {
            tracing::error!(?weights, ?final_scores, "non-finite ensemble scores");
            return Err(CareerError::PredictionFailed);
        }

        tracing::debug!(
            recommendation = %final_recommendation,
            ?personality_scores,
            ?reading_scores,
            "ensemble prediction"
        );

        Ok(PredictionResult {
            final_recommendation,
            final_scores,
            personality_scores,
            reading_scores,
        })
    }

    /// Predict from a request body with the default weights
    pub fn predict_request(&self, request: &PredictionRequest) -> Result<PredictionResult> {
        self.predict(&request.personality_scores, &request.reading_responses)
    }
}
