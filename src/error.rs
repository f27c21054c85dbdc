use askama::Template;
use askama_web::WebTemplate;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// User-facing message shown for any failure to load the job snapshot.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch jobs. Please try again later.";

#[derive(Debug, Clone, thiserror::Error)]
pub enum AppError {
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Job snapshot is still loading")]
    Loading,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Fetch(_) => StatusCode::BAD_GATEWAY,
            AppError::Loading => StatusCode::SERVICE_UNAVAILABLE,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to a visitor. Transport details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            AppError::Fetch(_) => FETCH_FAILED_MESSAGE.to_string(),
            AppError::Loading => "Jobs are still loading. Please try again shortly.".to_string(),
            AppError::NotFound(msg) | AppError::BadRequest(msg) => msg.clone(),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                "Internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = axum::Json(json!({ "error": self.public_message() }));
        (status, body).into_response()
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
struct ErrorTemplate {
    heading: String,
    message: String,
    can_refresh: bool,
}

/// Error type for HTML routes: same variants as [`AppError`], rendered as a
/// static page with a link back to the job list instead of a JSON body.
#[derive(Debug)]
pub struct HtmlError(pub AppError);

impl From<AppError> for HtmlError {
    fn from(err: AppError) -> Self {
        HtmlError(err)
    }
}

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        let heading = match &self.0 {
            AppError::NotFound(_) => "Not found",
            AppError::Fetch(_) => "Something went wrong",
            AppError::Loading => "Loading",
            AppError::BadRequest(_) => "Bad request",
            AppError::Internal(_) => "Something went wrong",
        };
        let tmpl = ErrorTemplate {
            heading: heading.to_string(),
            message: self.0.public_message(),
            can_refresh: matches!(self.0, AppError::Fetch(_)),
        };
        (status, tmpl).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn json_error_hides_fetch_details() {
        let response = AppError::Fetch("connection reset by peer".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], FETCH_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn html_not_found_renders_page() {
        let response = HtmlError(AppError::NotFound("Job not found".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Job not found"));
        assert!(html.contains("Back to Jobs"));
        assert!(!html.contains("action=\"/refresh\""));
    }
}
