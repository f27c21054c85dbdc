use askama::Template;
use axum::extract::{Path, RawQuery, State};
use axum::response::{Html, Redirect};

use crate::error::{AppError, HtmlError};
use crate::models::filter::{Category, FilterState};
use crate::models::job::JobRecord;
use crate::pagination::{MAX_VISIBLE_PAGES, page_window};
use crate::pipeline;
use crate::routes::AppState;
use crate::schema::JobPosting;
use crate::store::Snapshot;

/// Tags shown on a job card; the detail page shows all of them.
const CARD_TAG_LIMIT: usize = 4;

/// Seconds before the loading page reloads itself.
const LOADING_RETRY_SECS: u64 = 2;

pub struct JobCard {
    pub title: String,
    pub company_name: String,
    pub logo: Option<String>,
    pub job_type: String,
    pub location: String,
    pub posted_on: String,
    pub apply_url: String,
    pub detail_href: String,
    pub tags: Vec<String>,
}

impl JobCard {
    fn from_job(job: &JobRecord) -> Self {
        Self {
            title: job.title.clone(),
            company_name: job.company_name.clone(),
            logo: job.logo().map(String::from),
            job_type: job.job_type.clone(),
            location: job.candidate_required_location.clone(),
            posted_on: job.posted_on(),
            apply_url: job.apply_url.clone(),
            detail_href: format!("/job/{}", job.id),
            tags: job.tags.iter().take(CARD_TAG_LIMIT).cloned().collect(),
        }
    }
}

pub struct LocationOption {
    pub value: String,
    pub selected: bool,
}

pub struct TagChip {
    pub name: String,
    pub href: String,
    pub selected: bool,
}

pub struct PageLink {
    pub number: usize,
    pub href: String,
    pub current: bool,
}

pub struct PaginationView {
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
    pub first: Option<PageLink>,
    pub leading_ellipsis: bool,
    pub pages: Vec<PageLink>,
    pub trailing_ellipsis: bool,
    pub last: Option<PageLink>,
}

impl PaginationView {
    /// `None` when everything fits on one page.
    fn build(filter: &FilterState, total_pages: usize) -> Option<Self> {
        if total_pages <= 1 {
            return None;
        }
        let window = page_window(filter.current_page(), total_pages, MAX_VISIBLE_PAGES);
        let link = |number: usize| PageLink {
            number,
            href: filter.with_page(number).href(),
            current: number == window.current,
        };

        Some(Self {
            prev_href: window.prev.map(|p| filter.with_page(p).href()),
            next_href: window.next.map(|p| filter.with_page(p).href()),
            first: window.first_shortcut.then(|| link(1)),
            leading_ellipsis: window.leading_ellipsis,
            pages: window.pages.iter().map(|&p| link(p)).collect(),
            trailing_ellipsis: window.trailing_ellipsis,
            last: window.last_shortcut.then(|| link(window.total)),
        })
    }
}

#[derive(Template)]
#[template(path = "jobs/list.html")]
struct JobListTemplate {
    heading: String,
    form_action: String,
    total_jobs: usize,
    fetched_at: String,
    search_term: String,
    selected_tags: Vec<String>,
    locations: Vec<LocationOption>,
    tag_chips: Vec<TagChip>,
    total_matched: usize,
    cards: Vec<JobCard>,
    pagination: Option<PaginationView>,
    filtered: bool,
    clear_href: String,
}

#[derive(Template)]
#[template(path = "jobs/detail.html")]
struct JobDetailTemplate {
    title: String,
    company_name: String,
    logo: Option<String>,
    job_type: String,
    location: String,
    posted_on: String,
    salary: Option<String>,
    description: String,
    tags: Vec<String>,
    apply_url: String,
    schema_json: String,
}

#[derive(Template)]
#[template(path = "loading.html")]
struct LoadingTemplate {
    retry_secs: u64,
}

pub async fn list(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, HtmlError> {
    render_list(&state, None, query.as_deref()).await
}

/// List view for `/` and the category pages.
pub async fn render_list(
    state: &AppState,
    category: Option<Category>,
    raw_query: Option<&str>,
) -> Result<Html<String>, HtmlError> {
    let Some(snapshot) = state.store.snapshot().await? else {
        return loading_page();
    };

    let mut filter = FilterState::parse(category, raw_query);
    let mut result = pipeline::apply(&snapshot.jobs, &filter, state.page_size);
    if filter.current_page() > result.total_pages {
        filter = filter.clamped(result.total_pages);
        result = pipeline::apply(&snapshot.jobs, &filter, state.page_size);
    }

    let tmpl = JobListTemplate {
        heading: match category {
            Some(c) => format!("Remote {} Jobs", c.label()),
            None => "Find Your Dream Remote Job".to_string(),
        },
        form_action: filter.cleared().href(),
        total_jobs: snapshot.jobs.len(),
        fetched_at: snapshot.fetched_at.format("%B %-d, %Y %H:%M UTC").to_string(),
        search_term: filter.search_term().to_string(),
        selected_tags: filter.selected_tags().to_vec(),
        locations: location_options(&snapshot, &filter),
        tag_chips: tag_chips(&snapshot, &filter),
        total_matched: result.total_matched,
        cards: result.page.iter().map(|job| JobCard::from_job(job)).collect(),
        pagination: PaginationView::build(&filter, result.total_pages),
        filtered: filter.is_filtered(),
        clear_href: filter.cleared().href(),
    };
    Ok(Html(
        tmpl.render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    ))
}

fn location_options(snapshot: &Snapshot, filter: &FilterState) -> Vec<LocationOption> {
    snapshot
        .facets
        .locations
        .iter()
        .filter(|value| !value.is_empty())
        .map(|value| LocationOption {
            value: value.clone(),
            selected: value == filter.selected_location(),
        })
        .collect()
}

/// Popular tags plus any selected tag that is not among them, so a selection
/// can always be undone from the sidebar.
fn tag_chips(snapshot: &Snapshot, filter: &FilterState) -> Vec<TagChip> {
    let extra = filter
        .selected_tags()
        .iter()
        .filter(|t| !snapshot.facets.tags.contains(t));
    snapshot
        .facets
        .tags
        .iter()
        .chain(extra)
        .map(|name| TagChip {
            name: name.clone(),
            href: filter.toggle_tag(name).href(),
            selected: filter.has_tag(name),
        })
        .collect()
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, HtmlError> {
    let Some(snapshot) = state.store.snapshot().await? else {
        return loading_page();
    };

    let id: i64 = id
        .parse()
        .map_err(|_| AppError::NotFound("Job not found".to_string()))?;
    let job = snapshot.find(id)?;

    let schema_json = JobPosting::from_job(job)
        .to_script_json()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let tmpl = JobDetailTemplate {
        title: job.title.clone(),
        company_name: job.company_name.clone(),
        logo: job.logo().map(String::from),
        job_type: job.job_type.clone(),
        location: job.candidate_required_location.clone(),
        posted_on: job.posted_on(),
        salary: job.salary().map(String::from),
        description: job.description.clone(),
        tags: job.tags.clone(),
        apply_url: job.apply_url.clone(),
        schema_json,
    };
    Ok(Html(
        tmpl.render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    ))
}

/// Manual recovery: fetch the collection again, then go back to the list.
pub async fn refresh(State(state): State<AppState>) -> Redirect {
    if let Err(e) = state.store.refresh().await {
        tracing::warn!("Manual refresh failed: {e}");
    }
    Redirect::to("/")
}

fn loading_page() -> Result<Html<String>, HtmlError> {
    let tmpl = LoadingTemplate {
        retry_secs: LOADING_RETRY_SECS,
    };
    Ok(Html(
        tmpl.render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    ))
}
