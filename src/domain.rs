//! Career domains and per-domain score maps

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical career domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Domain {
    /// Data Science
    #[serde(rename = "Data Science")]
    DataScience,
    /// Software Development
    #[serde(rename = "Software Development")]
    SoftwareDevelopment,
    /// Tech Project Management
    #[serde(rename = "Tech Project Management")]
    TechProjectManagement,
}

impl Domain {
    /// All domains in enumeration order. Ties resolve to the earliest entry.
    pub const ALL: [Domain; 3] = [
        Domain::DataScience,
        Domain::SoftwareDevelopment,
        Domain::TechProjectManagement,
    ];

    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::DataScience => "Data Science",
            Domain::SoftwareDevelopment => "Software Development",
            Domain::TechProjectManagement => "Tech Project Management",
        }
    }

    fn index(self) -> usize {
        match self {
            Domain::DataScience => 0,
            Domain::SoftwareDevelopment => 1,
            Domain::TechProjectManagement => 2,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Domain::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("unknown domain: {}", s))
    }
}

/// Label attached to a cluster index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClusterLabel {
    /// Cluster stands for a canonical domain
    Domain(Domain),
    /// No canonical domain; excluded from scoring
    Mixed,
}

impl fmt::Display for ClusterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterLabel::Domain(d) => d.fmt(f),
            ClusterLabel::Mixed => f.write_str("Mixed"),
        }
    }
}

/// Probability (or score) per canonical domain.
///
/// Serializes as a map keyed by domain display name. Keys missing on input
/// read as 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DomainScores {
    /// Data Science
    #[serde(rename = "Data Science", default)]
    pub data_science: f64,
    /// Software Development
    #[serde(rename = "Software Development", default)]
    pub software_development: f64,
    /// Tech Project Management
    #[serde(rename = "Tech Project Management", default)]
    pub tech_project_management: f64,
}

impl DomainScores {
    /// Build from values in enumeration order
    pub fn from_array(values: [f64; 3]) -> Self {
        Self {
            data_science: values[0],
            software_development: values[1],
            tech_project_management: values[2],
        }
    }

    /// Values in enumeration order
    pub fn to_array(&self) -> [f64; 3] {
        [
            self.data_science,
            self.software_development,
            self.tech_project_management,
        ]
    }

    /// Score for a domain
    pub fn get(&self, domain: Domain) -> f64 {
        self.to_array()[domain.index()]
    }

    /// Add mass to a domain
    pub fn add(&mut self, domain: Domain, amount: f64) {
        match domain {
            Domain::DataScience => self.data_science += amount,
            Domain::SoftwareDevelopment => self.software_development += amount,
            Domain::TechProjectManagement => self.tech_project_management += amount,
        }
    }

    /// Sum over all domains
    pub fn total(&self) -> f64 {
        self.to_array().iter().sum()
    }

    /// Rescale to sum to 1.0. A map with no positive mass comes back unchanged.
    pub fn normalized(&self) -> Self {
        let total = self.total();
        if total > 0.0 {
            Self::from_array(self.to_array().map(|v| v / total))
        } else {
            *self
        }
    }

    /// Domain with the strictly highest score; earlier domains win ties
    pub fn best(&self) -> Domain {
        let mut best = Domain::DataScience;
        let mut best_score = self.get(best);
        for domain in Domain::ALL.into_iter().skip(1) {
            let score = self.get(domain);
            if score > best_score {
                best = domain;
                best_score = score;
            }
        }
        best
    }

    /// `(domain, score)` pairs in enumeration order
    pub fn iter(&self) -> impl Iterator<Item = (Domain, f64)> + '_ {
        Domain::ALL.into_iter().map(move |d| (d, self.get(d)))
    }

    /// True when every value is finite
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }
}
