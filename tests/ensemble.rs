//! End-to-end scenarios against the fixture model artifacts

mod common;

use career_ensemble::{
    combine, CareerError, ClusterLabel, Domain, EngineConfig, EnsemblePredictor, EnsembleWeights,
    InferenceEngine, PersonalityTraits, PredictionRequest, SurveyResponse,
};
use common::*;

#[test]
fn test_fixture_models_load() {
    let engine = fixture_engine();
    let summary = engine.summary();

    assert_eq!(summary.personality.clusters, 4);
    assert_eq!(summary.personality.features, 11);
    assert_eq!(summary.reading.clusters, 4);
    assert_eq!(summary.reading.features, 6);

    let labels = engine.reading().mapping().labels();
    assert_eq!(
        labels,
        &[
            ClusterLabel::Mixed,
            ClusterLabel::Domain(Domain::SoftwareDevelopment),
            ClusterLabel::Domain(Domain::DataScience),
            ClusterLabel::Domain(Domain::TechProjectManagement),
        ]
    );
}

#[test]
fn test_coder_scenario() {
    let predictor = EnsemblePredictor::new(fixture_engine());
    let result = predictor.predict(&coder_traits(), &coder_survey()).unwrap();

    assert_eq!(result.personality_scores.best(), Domain::SoftwareDevelopment);
    assert_eq!(result.reading_scores.best(), Domain::SoftwareDevelopment);
    assert_eq!(result.final_recommendation, Domain::SoftwareDevelopment);
}

#[test]
fn test_conflicted_scenario() {
    let predictor = EnsemblePredictor::new(fixture_engine());
    let result = predictor.predict(&manager_traits(), &analyst_survey()).unwrap();

    assert_eq!(result.personality_scores.best(), Domain::TechProjectManagement);
    assert_eq!(result.reading_scores.best(), Domain::DataScience);

    // The winner is whichever track is more decisive under equal weights.
    let p = result.personality_scores;
    let r = result.reading_scores;
    let personality_margin = p.tech_project_management - p.data_science;
    let reading_margin = r.data_science - r.tech_project_management;
    let expected = if personality_margin > reading_margin {
        Domain::TechProjectManagement
    } else {
        Domain::DataScience
    };
    assert_eq!(result.final_recommendation, expected);
    assert_eq!(result.final_recommendation, Domain::TechProjectManagement);
}

#[test]
fn test_final_scores_are_weighted_sum() {
    let predictor = EnsemblePredictor::new(fixture_engine());
    let result = predictor.predict(&manager_traits(), &coder_survey()).unwrap();

    for domain in Domain::ALL {
        let expected = 0.5 * result.personality_scores.get(domain) + 0.5 * result.reading_scores.get(domain);
        assert!((result.final_scores.get(domain) - expected).abs() < 1e-12);
    }
    let (_, best) = combine(&result.personality_scores, &result.reading_scores, EnsembleWeights::default());
    assert_eq!(result.final_recommendation, best);
}

#[test]
fn test_weights_can_flip_the_recommendation() {
    let predictor = EnsemblePredictor::new(fixture_engine());
    let traits = manager_traits();
    let survey = analyst_survey();

    let personality_only = predictor
        .predict_weighted(&traits, &survey, EnsembleWeights::new(1.0, 0.0))
        .unwrap();
    assert_eq!(personality_only.final_recommendation, Domain::TechProjectManagement);

    let reading_only = predictor
        .predict_weighted(&traits, &survey, EnsembleWeights::new(0.0, 1.0))
        .unwrap();
    assert_eq!(reading_only.final_recommendation, Domain::DataScience);
}

#[test]
fn test_prediction_is_deterministic() {
    let predictor = EnsemblePredictor::new(fixture_engine());
    let first = predictor.predict(&coder_traits(), &analyst_survey()).unwrap();
    for _ in 0..10 {
        assert_eq!(predictor.predict(&coder_traits(), &analyst_survey()).unwrap(), first);
    }

    let reloaded = EnsemblePredictor::new(fixture_engine());
    assert_eq!(reloaded.predict(&coder_traits(), &analyst_survey()).unwrap(), first);
}

#[test]
fn test_personality_mass_leaks_to_unmapped_cluster() {
    let engine = fixture_engine();
    assert_eq!(engine.personality().mapping().resolve(3), None);

    let scores = engine.predict_personality(&PersonalityTraits::default()).unwrap();
    // Neutral traits sit on the unmapped centroid, which takes the most mass.
    assert!(scores.total() < 0.5);
    assert!(scores.total() > 0.0);
}

#[test]
fn test_reading_scores_are_a_distribution() {
    let engine = fixture_engine();
    for survey in [SurveyResponse::default(), coder_survey(), analyst_survey()] {
        let scores = engine.predict_reading(&survey).unwrap();
        assert!((scores.total() - 1.0).abs() < 1e-9);
        assert!(scores.iter().all(|(_, v)| v >= 0.0));
    }
}

#[test]
fn test_alignment_boost_shifts_reading_scores() {
    let engine = fixture_engine();
    let plain = engine.predict_reading(&analyst_survey()).unwrap();

    let boosted_survey = SurveyResponse {
        chosen_project: "Building backend services and APIs".into(),
        team_choice: "Technical troubleshooting team".into(),
        ..analyst_survey()
    };
    let boosted = engine.predict_reading(&boosted_survey).unwrap();

    assert!(boosted.software_development > plain.software_development);
    assert!(boosted.data_science < plain.data_science);
    assert!((boosted.total() - 1.0).abs() < 1e-9);

    // (s + 0.3) / 1.3 for the doubly boosted domain
    let expected = (plain.software_development + 0.3) / 1.3;
    assert!((boosted.software_development - expected).abs() < 1e-9);
}

#[test]
fn test_demo_request_recommends_data_science() {
    let content = std::fs::read_to_string(
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/request.json"),
    )
    .unwrap();
    let request: PredictionRequest = serde_json::from_str(&content).unwrap();

    let predictor = EnsemblePredictor::new(fixture_engine());
    let result = predictor.predict_request(&request).unwrap();
    assert_eq!(result.final_recommendation, Domain::DataScience);
}

#[test]
fn test_missing_artifact_is_fatal() {
    let dir = scratch_models("missing");
    std::fs::remove_file(dir.join("reading_scaler.json")).unwrap();

    let config = EngineConfig {
        models_dir: dir,
        ..Default::default()
    };
    assert!(matches!(InferenceEngine::load(&config), Err(CareerError::Artifact { .. })));
}

#[test]
fn test_feature_count_mismatch_is_fatal() {
    let dir = scratch_models("mismatch");
    std::fs::write(
        dir.join("scaler.json"),
        r#"{"mean": [0.5, 0.5, 0.5], "scale": [0.25, 0.25, 0.25]}"#,
    )
    .unwrap();

    let config = EngineConfig {
        models_dir: dir,
        ..Default::default()
    };
    assert!(matches!(InferenceEngine::load(&config), Err(CareerError::Config(_))));
}

#[test]
fn test_reading_cluster_count_is_fatal() {
    let dir = scratch_models("three-clusters");
    std::fs::write(
        dir.join("reading_kmeans_model.json"),
        r#"{"centroids": [[0,0,0,0,0,0],[1,1,1,1,1,1],[2,2,2,2,2,2]]}"#,
    )
    .unwrap();

    let config = EngineConfig {
        models_dir: dir,
        ..Default::default()
    };
    assert!(matches!(InferenceEngine::load(&config), Err(CareerError::Config(_))));
}

#[test]
fn test_mapping_beyond_cluster_count_is_fatal() {
    let dir = scratch_models("bad-mapping");
    std::fs::write(dir.join("job_mapping.json"), r#"{"0": "Software_Developer", "9": "Tech_Project_Manager"}"#)
        .unwrap();

    let config = EngineConfig {
        models_dir: dir,
        ..Default::default()
    };
    assert!(InferenceEngine::load(&config).is_err());
}

#[test]
fn test_invalid_weights_fail_the_prediction() {
    let predictor = EnsemblePredictor::new(fixture_engine());
    let traits = coder_traits();
    let survey = coder_survey();

    for weights in [
        EnsembleWeights::new(-2.0, 0.5),
        EnsembleWeights::new(0.5, -0.1),
        EnsembleWeights::new(f64::NAN, 0.5),
        EnsembleWeights::new(f64::INFINITY, 0.5),
    ] {
        let err = predictor.predict_weighted(&traits, &survey, weights).unwrap_err();
        assert!(matches!(err, CareerError::PredictionFailed), "{:?}", weights);
    }

    // The same inputs still succeed at the default weights.
    let result = predictor.predict(&traits, &survey).unwrap();
    assert_eq!(result.final_recommendation, Domain::SoftwareDevelopment);
}

#[test]
fn test_overflowing_scores_fail_the_prediction() {
    let predictor = EnsemblePredictor::new(fixture_engine());
    let weights = EnsembleWeights::new(f64::MAX, f64::MAX);
    assert!(weights.validate().is_ok());

    let err = predictor
        .predict_weighted(&coder_traits(), &coder_survey(), weights)
        .unwrap_err();
    assert!(matches!(err, CareerError::PredictionFailed));
}
