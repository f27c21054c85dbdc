//! Test fixtures and a handwritten mock job source.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::job::JobRecord;
use crate::source::JobSource;

/// Build a record with the fields the pipeline looks at; the rest get
/// plausible defaults.
pub fn job(id: i64, title: &str, company: &str, tags: &[&str], location: &str) -> JobRecord {
    JobRecord {
        id,
        title: title.to_string(),
        company_name: company.to_string(),
        company_logo: None,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        job_type: "full_time".to_string(),
        publication_date: "2024-05-01T12:00:00".to_string(),
        candidate_required_location: location.to_string(),
        salary: None,
        description: format!("<p>{title} at {company}</p>"),
        apply_url: format!("https://example.com/jobs/{id}"),
        category: None,
    }
}

fn in_category(mut record: JobRecord, category: &str) -> JobRecord {
    record.category = Some(category.to_string());
    record
}

/// Seven jobs covering every predicate and category preset.
pub fn sample_jobs() -> Vec<JobRecord> {
    vec![
        in_category(
            job(1, "Backend Engineer", "Acme", &["python", "remote"], "USA"),
            "Software Development",
        ),
        in_category(
            job(2, "Product Designer", "Studio", &["figma", "ui"], "USA Only"),
            "Design",
        ),
        in_category(
            job(3, "Rust Engineer", "Ferrous Co", &["rust", "remote"], "USA"),
            "Software Development",
        ),
        in_category(
            job(4, "Marketing Lead", "Acme", &["seo", "growth"], "Worldwide"),
            "Marketing",
        ),
        in_category(
            job(5, "Systems Engineer", "Oxide Ltd", &["rust", "c"], "Worldwide"),
            "DevOps / Sysadmin",
        ),
        in_category(
            job(6, "Brand Designer", "Studio", &["figma", "branding"], "Europe"),
            "Design",
        ),
        in_category(
            job(7, "Data Engineer", "Acme", &["python", "sql"], "USA"),
            "Data Analysis",
        ),
    ]
}

/// Mock source answering from a queue of canned responses.
/// Once the queue is drained it keeps returning an empty collection.
pub struct MockSource {
    responses: Mutex<Vec<Result<Vec<JobRecord>, AppError>>>,
}

impl MockSource {
    pub fn new(jobs: Vec<JobRecord>) -> Self {
        Self::with_responses(vec![Ok(jobs)])
    }

    pub fn with_error(error: AppError) -> Self {
        Self::with_responses(vec![Err(error)])
    }

    pub fn with_responses(responses: Vec<Result<Vec<JobRecord>, AppError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
        }
    }
}

#[async_trait]
impl JobSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_all(&self) -> Result<Vec<JobRecord>, AppError> {
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(Vec::new())
        } else {
            responses.remove(0)
        }
    }
}
