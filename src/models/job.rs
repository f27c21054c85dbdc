use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// One posting as served by the job source. Never mutated after a fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company_name: String,
    #[serde(default)]
    pub company_logo: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub publication_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub candidate_required_location: String,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "url", default, deserialize_with = "null_as_default")]
    pub apply_url: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Wire envelope returned by the job source.
#[derive(Debug, Deserialize)]
pub struct JobsEnvelope {
    pub jobs: Vec<JobRecord>,
}

impl JobRecord {
    /// Logo URL, if the source provided a non-empty one.
    pub fn logo(&self) -> Option<&str> {
        self.company_logo.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn salary(&self) -> Option<&str> {
        self.salary.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Publication date for display, e.g. "May 1, 2024".
    /// Falls back to the raw string when it is not a recognizable ISO-8601 value.
    pub fn posted_on(&self) -> String {
        let raw = self.publication_date.trim();
        let date = DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.date_naive())
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
            .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));
        match date {
            Ok(d) => d.format("%B %-d, %Y").to_string(),
            Err(_) => raw.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_remotive_record() {
        let raw = r#"{
            "id": 1942010,
            "url": "https://remotive.com/remote-jobs/software-dev/backend-engineer-1942010",
            "title": "Backend Engineer",
            "company_name": "Acme",
            "company_logo": "https://remotive.com/job/1942010/logo",
            "category": "Software Development",
            "tags": ["python", "aws"],
            "job_type": "full_time",
            "publication_date": "2024-05-01T12:34:56",
            "candidate_required_location": "USA",
            "salary": "",
            "description": "<p>Build things</p>"
        }"#;

        let job: JobRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(job.id, 1942010);
        assert_eq!(job.apply_url, "https://remotive.com/remote-jobs/software-dev/backend-engineer-1942010");
        assert_eq!(job.tags, vec!["python", "aws"]);
        assert_eq!(job.category.as_deref(), Some("Software Development"));
        assert_eq!(job.salary(), None);
        assert_eq!(job.posted_on(), "May 1, 2024");
    }

    #[test]
    fn tolerates_missing_and_null_fields() {
        let raw = r#"{"id": 7, "title": "Designer", "company_name": "Studio", "company_logo": null, "tags": null}"#;
        let job: JobRecord = serde_json::from_str(raw).unwrap();
        assert!(job.tags.is_empty());
        assert_eq!(job.logo(), None);
        assert_eq!(job.category, None);
    }

    #[test]
    fn posted_on_formats_known_shapes() {
        let mut job: JobRecord = serde_json::from_str(r#"{"id": 1}"#).unwrap();

        job.publication_date = "2023-12-09T08:00:00+00:00".into();
        assert_eq!(job.posted_on(), "December 9, 2023");

        job.publication_date = "2023-01-31".into();
        assert_eq!(job.posted_on(), "January 31, 2023");

        job.publication_date = "last tuesday".into();
        assert_eq!(job.posted_on(), "last tuesday");
    }
}
