//! schema.org `JobPosting` structured data for the detail page.

use serde::Serialize;

use crate::models::job::JobRecord;

#[derive(Debug, Serialize)]
pub struct JobPosting<'a> {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    kind: &'static str,
    title: &'a str,
    #[serde(rename = "datePosted")]
    date_posted: &'a str,
    description: &'a str,
    #[serde(rename = "employmentType")]
    employment_type: &'a str,
    #[serde(rename = "hiringOrganization")]
    hiring_organization: Organization<'a>,
    #[serde(rename = "jobLocationType")]
    job_location_type: &'static str,
    #[serde(rename = "applicantLocationRequirements")]
    applicant_location_requirements: Country,
    #[serde(rename = "jobLocation")]
    job_location: Place,
}

#[derive(Debug, Serialize)]
struct Organization<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    logo: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct Country {
    #[serde(rename = "@type")]
    kind: &'static str,
    name: &'static str,
}

#[derive(Debug, Serialize)]
struct Place {
    #[serde(rename = "@type")]
    kind: &'static str,
    address: PostalAddress,
}

#[derive(Debug, Serialize)]
struct PostalAddress {
    #[serde(rename = "@type")]
    kind: &'static str,
    #[serde(rename = "addressCountry")]
    address_country: &'static str,
}

impl<'a> JobPosting<'a> {
    pub fn from_job(job: &'a JobRecord) -> Self {
        Self {
            context: "https://schema.org",
            kind: "JobPosting",
            title: &job.title,
            date_posted: &job.publication_date,
            description: &job.description,
            employment_type: &job.job_type,
            hiring_organization: Organization {
                kind: "Organization",
                name: &job.company_name,
                logo: job.logo(),
            },
            job_location_type: "TELECOMMUTE",
            applicant_location_requirements: Country {
                kind: "Country",
                name: "United States",
            },
            job_location: Place {
                kind: "Place",
                address: PostalAddress {
                    kind: "PostalAddress",
                    address_country: "US",
                },
            },
        }
    }

    /// JSON suitable for the body of a `<script type="application/ld+json">`
    /// element. `<`, `>` and `&` are emitted as unicode escapes so nothing in
    /// the description can terminate the script element.
    pub fn to_script_json(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string(self)?;
        Ok(json
            .replace('<', "\\u003c")
            .replace('>', "\\u003e")
            .replace('&', "\\u0026"))
    }
}
