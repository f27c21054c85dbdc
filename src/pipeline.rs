//! Filter, search and paginate a job snapshot.
//!
//! Everything here is synchronous and allocation-light: the result borrows
//! from the snapshot, so a request handler can run it on every hit.

use serde::Serialize;

use crate::models::filter::FilterState;
use crate::models::job::JobRecord;

/// One page of matched jobs plus the numbers needed to render pagination.
#[derive(Debug, Serialize)]
pub struct PageResult<'a> {
    pub page: Vec<&'a JobRecord>,
    pub total_matched: usize,
    pub total_pages: usize,
}

/// Run the filter state over `jobs` and cut out the requested page.
///
/// Input order is preserved. A page past the end yields an empty slice.
pub fn apply<'a>(jobs: &'a [JobRecord], filter: &FilterState, page_size: usize) -> PageResult<'a> {
    let page_size = page_size.max(1);
    let needle = filter.search_term().to_lowercase();

    let matched: Vec<&JobRecord> = jobs
        .iter()
        .filter(|job| matches(job, filter, &needle))
        .collect();

    let total_matched = matched.len();
    let total_pages = total_matched.div_ceil(page_size).max(1);

    let offset = (filter.current_page().max(1) - 1).saturating_mul(page_size);
    let page = matched
        .into_iter()
        .skip(offset)
        .take(page_size)
        .collect();

    PageResult {
        page,
        total_matched,
        total_pages,
    }
}

/// `needle` is the search term already lowercased.
fn matches(job: &JobRecord, filter: &FilterState, needle: &str) -> bool {
    matches_search(job, needle)
        && matches_location(job, filter.selected_location())
        && matches_tags(job, filter.selected_tags())
        && filter
            .category()
            .is_none_or(|c| c.matches(job.category.as_deref()))
}

fn matches_search(job: &JobRecord, needle: &str) -> bool {
    needle.is_empty()
        || job.title.to_lowercase().contains(needle)
        || job.company_name.to_lowercase().contains(needle)
        || job.tags.iter().any(|t| t.to_lowercase().contains(needle))
}

fn matches_location(job: &JobRecord, location: &str) -> bool {
    location.is_empty() || job.candidate_required_location == location
}

fn matches_tags(job: &JobRecord, selected: &[String]) -> bool {
    selected.iter().all(|tag| job.tags.contains(tag))
}
