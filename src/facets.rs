use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::job::JobRecord;

/// How many tags the filter sidebar offers.
pub const POPULAR_TAG_LIMIT: usize = 15;

/// Values for the filter controls, derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub locations: Vec<String>,
    pub tags: Vec<String>,
}

impl Facets {
    pub fn from_jobs(jobs: &[JobRecord]) -> Self {
        Self {
            locations: extract_locations(jobs),
            tags: extract_tags(jobs, POPULAR_TAG_LIMIT),
        }
    }
}

/// Distinct `candidate_required_location` values, sorted. No normalization:
/// "USA" and "USA Only" are separate entries.
pub fn extract_locations(jobs: &[JobRecord]) -> Vec<String> {
    jobs.iter()
        .map(|j| j.candidate_required_location.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}

/// Distinct tags across all jobs, sorted, cut to the first `limit`.
pub fn extract_tags(jobs: &[JobRecord], limit: usize) -> Vec<String> {
    jobs.iter()
        .flat_map(|j| j.tags.iter().map(String::as_str))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .take(limit)
        .map(String::from)
        .collect()
}
