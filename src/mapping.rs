//! Cluster index to career domain resolution
//!
//! The personality track ships a training-time table of cluster index to
//! internal label. The reading track has no such table; its labels are read
//! off the centroid positions when the model loads.

use crate::domain::{ClusterLabel, Domain, DomainScores};
use crate::{CareerError, Result};
use ndarray::{ArrayView1, ArrayView2};
use std::collections::BTreeMap;

/// Internal personality-model labels and the domains they stand for
pub const PERSONALITY_LABELS: [(&str, Domain); 3] = [
    ("Data_Science_AI_ML", Domain::DataScience),
    ("Software_Developer", Domain::SoftwareDevelopment),
    ("Tech_Project_Manager", Domain::TechProjectManagement),
];

/// Number of clusters the derived reading mapping is defined for
pub const READING_CLUSTERS: usize = 4;

/// Resolve an internal personality label
pub fn canonical_domain(label: &str) -> Option<Domain> {
    PERSONALITY_LABELS
        .iter()
        .find(|(l, _)| *l == label)
        .map(|(_, d)| *d)
}

/// Training-time cluster -> internal label table (personality track)
#[derive(Debug, Clone, PartialEq)]
pub struct StaticMapping {
    labels: BTreeMap<usize, String>,
    domains: Vec<Option<Domain>>,
}

impl StaticMapping {
    /// Bind a label table to a model with `n_clusters` clusters
    pub fn new(labels: BTreeMap<usize, String>, n_clusters: usize) -> Result<Self> {
        if let Some(&cluster) = labels.keys().find(|&&c| c >= n_clusters) {
            return Err(CareerError::Config(format!(
                "mapping names cluster {} but the model has {} clusters",
                cluster, n_clusters
            )));
        }

        let domains: Vec<Option<Domain>> = (0..n_clusters)
            .map(|cluster| labels.get(&cluster).and_then(|l| canonical_domain(l)))
            .collect();

        for (cluster, domain) in domains.iter().enumerate() {
            if domain.is_none() {
                tracing::warn!(
                    cluster,
                    label = labels.get(&cluster).map(String::as_str).unwrap_or("<none>"),
                    "personality cluster has no canonical domain; its probability is dropped"
                );
            }
        }

        Ok(Self { labels, domains })
    }

    /// Internal label for a cluster
    pub fn label(&self, cluster: usize) -> Option<&str> {
        self.labels.get(&cluster).map(String::as_str)
    }

    /// Canonical domain for a cluster
    pub fn resolve(&self, cluster: usize) -> Option<Domain> {
        self.domains.get(cluster).copied().flatten()
    }

    /// Sum cluster probabilities into domains.
    ///
    /// Clusters without a canonical domain are dropped, not redistributed, so
    /// the result can total less than 1.0.
    pub fn fold(&self, probs: ArrayView1<'_, f64>) -> DomainScores {
        let mut scores = DomainScores::default();
        for (cluster, &p) in probs.iter().enumerate() {
            if let Some(domain) = self.resolve(cluster) {
                scores.add(domain, p);
            }
        }
        scores
    }
}

/// Centroid-derived cluster labels (reading track)
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedMapping {
    labels: Vec<ClusterLabel>,
}

impl DerivedMapping {
    /// Derive labels from a `4 x n_features` centroid matrix.
    ///
    /// Greedy and order-dependent: highest pattern_focus (column 0) is Data
    /// Science, then the highest problem_solving_focus (column 1) among the
    /// rest is Software Development, then the highest management_design_focus
    /// (column 2) among the rest is Tech Project Management. The leftover
    /// cluster is Mixed. Ties go to the lower cluster index.
    pub fn from_centroids(centroids: ArrayView2<'_, f64>) -> Result<Self> {
        if centroids.nrows() != READING_CLUSTERS {
            return Err(CareerError::Config(format!(
                "reading model must have exactly {} clusters, found {}",
                READING_CLUSTERS,
                centroids.nrows()
            )));
        }
        if centroids.ncols() < Domain::ALL.len() {
            return Err(CareerError::Config(format!(
                "reading centroids need at least {} features, found {}",
                Domain::ALL.len(),
                centroids.ncols()
            )));
        }

        let mut labels = vec![ClusterLabel::Mixed; READING_CLUSTERS];
        let mut assigned = [false; READING_CLUSTERS];

        for (column, domain) in Domain::ALL.into_iter().enumerate() {
            let mut best: Option<(usize, f64)> = None;
            for (cluster, &value) in centroids.column(column).iter().enumerate() {
                if assigned[cluster] {
                    continue;
                }
                if best.map_or(true, |(_, top)| value > top) {
                    best = Some((cluster, value));
                }
            }
            // Four clusters, three domains: a candidate always remains.
            if let Some((cluster, _)) = best {
                labels[cluster] = ClusterLabel::Domain(domain);
                assigned[cluster] = true;
            }
        }

        Ok(Self { labels })
    }

    /// Label for a cluster
    pub fn label(&self, cluster: usize) -> Option<ClusterLabel> {
        self.labels.get(cluster).copied()
    }

    /// Labels in cluster-index order
    pub fn labels(&self) -> &[ClusterLabel] {
        &self.labels
    }

    /// Sum cluster probabilities into domains, skip Mixed, renormalize
    pub fn fold(&self, probs: ArrayView1<'_, f64>) -> DomainScores {
        let mut scores = DomainScores::default();
        for (cluster, &p) in probs.iter().enumerate() {
            if let Some(ClusterLabel::Domain(domain)) = self.label(cluster) {
                scores.add(domain, p);
            }
        }
        scores.normalized()
    }
}
