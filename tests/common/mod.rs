//! Shared fixtures for the integration suites

#![allow(dead_code)]

use career_ensemble::{EngineConfig, InferenceEngine, PersonalityTraits, SurveyResponse};
use std::path::PathBuf;

pub fn fixture_models_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/models")
}

pub fn fixture_config() -> EngineConfig {
    EngineConfig {
        models_dir: fixture_models_dir(),
        ..Default::default()
    }
}

pub fn fixture_engine() -> InferenceEngine {
    InferenceEngine::load(&fixture_config()).expect("fixture models load")
}

/// Copy the fixture models into a fresh scratch directory
pub fn scratch_models(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("career-ensemble-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    for entry in std::fs::read_dir(fixture_models_dir()).unwrap() {
        let entry = entry.unwrap();
        std::fs::copy(entry.path(), dir.join(entry.file_name())).unwrap();
    }
    dir
}

pub fn coder_traits() -> PersonalityTraits {
    PersonalityTraits::from_pairs([
        ("R", 0.9), ("I", 0.7), ("A", 0.3), ("S", 0.2), ("E", 0.3), ("C", 0.6),
        ("O", 0.5), ("C2", 0.6), ("E2", 0.3), ("A2", 0.5), ("N", 0.2),
    ])
}

pub fn coder_survey() -> SurveyResponse {
    SurveyResponse {
        q_pattern1: 2,
        q_pattern2: 2,
        q_probsolve1: 5,
        q_probsolve2: 5,
        q_mgmt1: 1,
        q_mgmt2: 1,
        chosen_activity: "Fixing a broken system or solving a technical problem".into(),
        free_text: "I kept thinking about how the system in the passage could be repaired. \
                    Tracing the failure back to one bad assumption and fixing it step by step \
                    was the part I enjoyed most."
            .into(),
        ..Default::default()
    }
}

pub fn manager_traits() -> PersonalityTraits {
    PersonalityTraits::from_pairs([
        ("R", 0.2), ("I", 0.3), ("A", 0.3), ("S", 0.9), ("E", 0.9), ("C", 0.5),
        ("O", 0.6), ("C2", 0.5), ("E2", 0.9), ("A2", 0.8), ("N", 0.2),
    ])
}

pub fn analyst_survey() -> SurveyResponse {
    SurveyResponse {
        q_pattern1: 5,
        q_pattern2: 5,
        q_probsolve1: 2,
        q_probsolve2: 2,
        q_mgmt1: 1,
        q_mgmt2: 1,
        chosen_activity: "Discovering hidden trends or logical patterns".into(),
        free_text: "x".repeat(140),
        ..Default::default()
    }
}
