//! Alignment boosting for the reading track

use crate::domain::{Domain, DomainScores};

/// Default additive boost per matching answer
pub const DEFAULT_BOOST_FACTOR: f64 = 0.15;

/// `chosenProject` phrases, checked in order
pub const PROJECT_PHRASES: [(&str, Domain); 3] = [
    ("Analyzing data", Domain::DataScience),
    ("Building backend", Domain::SoftwareDevelopment),
    ("Designing user interfaces", Domain::TechProjectManagement),
];

/// `team_choice` phrases, checked in order
pub const TEAM_PHRASES: [(&str, Domain); 3] = [
    ("Observation and analysis", Domain::DataScience),
    ("Technical troubleshooting", Domain::SoftwareDevelopment),
    ("Design and presentation", Domain::TechProjectManagement),
];

/// First domain whose phrase occurs in `answer`
fn match_phrase(answer: &str, phrases: &[(&str, Domain)]) -> Option<Domain> {
    phrases
        .iter()
        .find(|(phrase, _)| answer.contains(phrase))
        .map(|(_, domain)| *domain)
}

/// Adds a fixed boost to the domains named by the project and team answers,
/// then renormalizes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentBooster {
    factor: f64,
}

impl AlignmentBooster {
    /// Create with a boost factor
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }

    /// Boost factor
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Apply both boosts and renormalize. Zero total mass is returned as is.
    pub fn apply(&self, scores: DomainScores, project: &str, team: &str) -> DomainScores {
        let mut boosted = scores;

        if let Some(domain) = match_phrase(project, &PROJECT_PHRASES) {
            tracing::debug!(%domain, "project choice boost");
            boosted.add(domain, self.factor);
        }
        if let Some(domain) = match_phrase(team, &TEAM_PHRASES) {
            tracing::debug!(%domain, "team choice boost");
            boosted.add(domain, self.factor);
        }

        boosted.normalized()
    }
}

impl Default for AlignmentBooster {
    fn default() -> Self {
        Self::new(DEFAULT_BOOST_FACTOR)
    }
}
