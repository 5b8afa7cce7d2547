//! AI code-review endpoint.

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::http::{ApiClient, send};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
}

impl ReviewRequest {
    /// Build a request, dropping a blank comment or repo URL entirely.
    pub fn new(code: String, comment: Option<String>, repo_url: Option<String>) -> Self {
        Self {
            code,
            comment: comment
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            repo_url: repo_url
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ReviewResponse {
    #[serde(default, alias = "content")]
    pub review: String,
    #[serde(default)]
    pub questions: Vec<String>,
}

/// Request a review. A successful but empty AI response is a domain error;
/// a non-JSON success body is treated as the review text itself.
pub async fn request_review(
    client: &ApiClient,
    request: &ReviewRequest,
) -> ApiResult<ReviewResponse> {
    let response = send(client.post("/review").json(request)).await?;
    let raw = response.text().await.map_err(ApiError::from_transport)?;

    let parsed = parse_review_body(&raw);
    if parsed.review.trim().is_empty() {
        return Err(ApiError::Domain("the AI review came back empty".into()));
    }
    Ok(parsed)
}

fn parse_review_body(raw: &str) -> ReviewResponse {
    match serde_json::from_str::<ReviewResponse>(raw) {
        Ok(parsed) => parsed,
        Err(_) => ReviewResponse {
            review: raw.to_string(),
            questions: Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_body_parses_review_and_questions() {
        let parsed = parse_review_body(r#"{"review":"Looks fine","questions":["Why?"]}"#);
        assert_eq!(parsed.review, "Looks fine");
        assert_eq!(parsed.questions, vec!["Why?".to_string()]);
    }

    #[test]
    fn content_field_is_accepted_as_review() {
        let parsed = parse_review_body(r#"{"content":"Alt shape"}"#);
        assert_eq!(parsed.review, "Alt shape");
    }

    #[test]
    fn non_json_body_degrades_to_plain_review_text() {
        let parsed = parse_review_body("Just some markdown output");
        assert_eq!(parsed.review, "Just some markdown output");
        assert!(parsed.questions.is_empty());
    }

    #[test]
    fn blank_comment_and_repo_are_dropped() {
        let request = ReviewRequest::new("code".into(), Some("   ".into()), Some(String::new()));
        assert!(request.comment.is_none());
        assert!(request.repo_url.is_none());

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("comment").is_none());
        assert!(value.get("repoUrl").is_none());
    }
}
