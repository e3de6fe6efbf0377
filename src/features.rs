//! Feature Extraction
//!
//! Turns raw request payloads into the fixed-order numeric vectors the two
//! tracks feed their scalers. Out-of-range or malformed inputs are never
//! rejected here; they fall back to the neutral defaults below.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use statrs::statistics::Statistics;
use std::collections::HashMap;

/// Personality feature order the personality scaler was fit on
pub const PERSONALITY_FEATURES: [&str; 11] =
    ["R", "I", "A", "S", "E", "C", "O", "C2", "E2", "A2", "N"];

/// Reading feature order the reading scaler was fit on
pub const READING_FEATURES: [&str; 6] = [
    "pattern_focus",
    "problem_solving_focus",
    "management_design_focus",
    "attention_consistency",
    "preference_alignment",
    "engagement_score",
];

/// Trait value used for missing or unusable entries
pub const NEUTRAL_TRAIT: f64 = 0.5;

/// Likert rating used for missing or unusable entries
pub const NEUTRAL_LIKERT: u8 = 3;

/// Free-text length (characters) at which engagement saturates
pub const ENGAGEMENT_SATURATION_CHARS: f64 = 200.0;

const ANALYTICAL_ACTIVITY: &str = "Discovering hidden trends";
const TECHNICAL_ACTIVITY: &str = "Fixing a broken system";

/// Self-reported personality traits (RIASEC + Big Five), each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, Value>", into = "HashMap<String, f64>")]
pub struct PersonalityTraits {
    values: [f64; 11],
}

impl PersonalityTraits {
    /// Build from values in [`PERSONALITY_FEATURES`] order
    pub fn new(values: [f64; 11]) -> Self {
        let mut traits = Self { values: [NEUTRAL_TRAIT; 11] };
        for (name, value) in PERSONALITY_FEATURES.iter().zip(values) {
            traits.set(name, value);
        }
        traits
    }

    /// Build from `(trait, value)` pairs; absent traits stay neutral
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        let mut traits = Self::default();
        for (name, value) in pairs {
            traits.set(name, value);
        }
        traits
    }

    /// Set a trait by key. Unknown keys are ignored.
    pub fn set(&mut self, name: &str, value: f64) {
        let Some(index) = PERSONALITY_FEATURES.iter().position(|f| *f == name) else {
            tracing::debug!(trait_name = name, "ignoring unknown personality trait");
            return;
        };
        self.values[index] = if value.is_finite() && (0.0..=1.0).contains(&value) {
            value
        } else {
            tracing::debug!(trait_name = name, value, "trait out of range, using neutral value");
            NEUTRAL_TRAIT
        };
    }

    /// Trait value by key
    pub fn get(&self, name: &str) -> Option<f64> {
        PERSONALITY_FEATURES
            .iter()
            .position(|f| *f == name)
            .map(|i| self.values[i])
    }

    /// Convert to feature vector
    pub fn to_vector(&self) -> Vec<f64> {
        self.values.to_vec()
    }
}

impl Default for PersonalityTraits {
    fn default() -> Self {
        Self { values: [NEUTRAL_TRAIT; 11] }
    }
}

impl From<HashMap<String, Value>> for PersonalityTraits {
    fn from(map: HashMap<String, Value>) -> Self {
        let mut traits = Self::default();
        for (name, value) in &map {
            match value.as_f64() {
                Some(v) => traits.set(name, v),
                None => tracing::debug!(trait_name = %name, "non-numeric trait, using neutral value"),
            }
        }
        for name in PERSONALITY_FEATURES.iter().filter(|f| !map.contains_key(**f)) {
            tracing::debug!(trait_name = name, "missing trait, using neutral value");
        }
        traits
    }
}

impl From<PersonalityTraits> for HashMap<String, f64> {
    fn from(traits: PersonalityTraits) -> Self {
        PERSONALITY_FEATURES
            .iter()
            .zip(traits.values)
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }
}

/// Raw reading-comprehension survey answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyResponse {
    /// Pattern item 1 (Likert 1-5)
    #[serde(rename = "Qpattern1", default = "neutral_likert", deserialize_with = "lenient_likert")]
    pub q_pattern1: u8,
    /// Pattern item 2 (Likert 1-5)
    #[serde(rename = "Qpattern2", default = "neutral_likert", deserialize_with = "lenient_likert")]
    pub q_pattern2: u8,
    /// Problem-solving item 1 (Likert 1-5)
    #[serde(rename = "Qprobsolve1", default = "neutral_likert", deserialize_with = "lenient_likert")]
    pub q_probsolve1: u8,
    /// Problem-solving item 2 (Likert 1-5)
    #[serde(rename = "Qprobsolve2", default = "neutral_likert", deserialize_with = "lenient_likert")]
    pub q_probsolve2: u8,
    /// Management/design item 1 (Likert 1-5)
    #[serde(rename = "Qmgmt1", default = "neutral_likert", deserialize_with = "lenient_likert")]
    pub q_mgmt1: u8,
    /// Management/design item 2 (Likert 1-5)
    #[serde(rename = "Qmgmt2", default = "neutral_likert", deserialize_with = "lenient_likert")]
    pub q_mgmt2: u8,
    /// Preferred activity
    #[serde(rename = "chosenActivity", default = "empty_text", deserialize_with = "lenient_text")]
    pub chosen_activity: String,
    /// Free-text reflection on the reading passage
    #[serde(rename = "freeText", default = "empty_text", deserialize_with = "lenient_text")]
    pub free_text: String,
    /// Preferred project
    #[serde(rename = "chosenProject", default = "empty_text", deserialize_with = "lenient_text")]
    pub chosen_project: String,
    /// Preferred team
    #[serde(rename = "team_choice", default = "empty_text", deserialize_with = "lenient_text")]
    pub team_choice: String,
}

impl Default for SurveyResponse {
    fn default() -> Self {
        Self {
            q_pattern1: NEUTRAL_LIKERT,
            q_pattern2: NEUTRAL_LIKERT,
            q_probsolve1: NEUTRAL_LIKERT,
            q_probsolve2: NEUTRAL_LIKERT,
            q_mgmt1: NEUTRAL_LIKERT,
            q_mgmt2: NEUTRAL_LIKERT,
            chosen_activity: String::new(),
            free_text: String::new(),
            chosen_project: String::new(),
            team_choice: String::new(),
        }
    }
}

fn neutral_likert() -> u8 {
    tracing::debug!("missing Likert rating, using neutral value");
    NEUTRAL_LIKERT
}

fn empty_text() -> String {
    tracing::debug!("missing answer, using empty text");
    String::new()
}

fn lenient_likert<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let rating = value
        .as_i64()
        .or_else(|| value.as_f64().filter(|v| v.fract() == 0.0).map(|v| v as i64))
        .filter(|v| (1..=5).contains(v));
    Ok(match rating {
        Some(v) => v as u8,
        None => {
            tracing::debug!(%value, "unusable Likert rating, using neutral value");
            NEUTRAL_LIKERT
        }
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        other => {
            if !other.is_null() {
                tracing::debug!(value = %other, "non-string answer, using empty text");
            }
            String::new()
        }
    })
}

/// Likert 1-5 mapped onto [0, 1]; ratings outside 1-5 read as neutral
fn normalize_likert(rating: u8) -> f64 {
    let rating = if (1..=5).contains(&rating) { rating } else { NEUTRAL_LIKERT };
    (f64::from(rating) - 1.0) / 4.0
}

fn pair_focus(first: u8, second: u8) -> f64 {
    (normalize_likert(first) + normalize_likert(second)) / 2.0
}

/// Cognitive features derived from a survey response
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadingFeatures {
    /// Mean of the two pattern items
    pub pattern_focus: f64,
    /// Mean of the two problem-solving items
    pub problem_solving_focus: f64,
    /// Mean of the two management/design items
    pub management_design_focus: f64,
    /// 1 - population std-dev of the three focus scores. Not clamped.
    pub attention_consistency: f64,
    /// Focus score matching the chosen activity
    pub preference_alignment: f64,
    /// Free-text length, saturating at 200 characters
    pub engagement_score: f64,
}

impl ReadingFeatures {
    /// Derive features from a raw survey
    pub fn from_survey(survey: &SurveyResponse) -> Self {
        let pattern_focus = pair_focus(survey.q_pattern1, survey.q_pattern2);
        let problem_solving_focus = pair_focus(survey.q_probsolve1, survey.q_probsolve2);
        let management_design_focus = pair_focus(survey.q_mgmt1, survey.q_mgmt2);

        let attention_consistency = 1.0
            - [pattern_focus, problem_solving_focus, management_design_focus].population_std_dev();

        // First matching phrase wins; anything else counts as management/design.
        let preference_alignment = if survey.chosen_activity.contains(ANALYTICAL_ACTIVITY) {
            pattern_focus
        } else if survey.chosen_activity.contains(TECHNICAL_ACTIVITY) {
            problem_solving_focus
        } else {
            management_design_focus
        };

        let text_len = survey.free_text.chars().count() as f64;
        let engagement_score = (text_len / ENGAGEMENT_SATURATION_CHARS).min(1.0);

        Self {
            pattern_focus,
            problem_solving_focus,
            management_design_focus,
            attention_consistency,
            preference_alignment,
            engagement_score,
        }
    }

    /// Convert to feature vector in [`READING_FEATURES`] order
    pub fn to_vector(&self) -> Vec<f64> {
        vec![
            self.pattern_focus,
            self.problem_solving_focus,
            self.management_design_focus,
            self.attention_consistency,
            self.preference_alignment,
            self.engagement_score,
        ]
    }
}
