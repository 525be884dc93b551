//! Response bodies: plain acknowledgements and RFC 7807 problem details.

use serde::{Deserialize, Serialize};

/// Plain acknowledgement body, e.g. `{"message": "Successfully liked"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Problem details body (RFC 7807) returned for every failed request.
///
/// `detail` carries the user-facing message, e.g. `"Not a valid page."`.
/// The same text is repeated in the `error` extension member, which is what
/// browser clients read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: None,
            error: None,
        }
    }

    pub fn with_detail(self, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self {
            error: Some(detail.clone()),
            detail: Some(detail),
            ..self
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(400, "Bad Request").with_detail(detail)
    }

    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::new(403, "Forbidden").with_detail(detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(404, "Not Found").with_detail(detail)
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::new(409, "Conflict").with_detail(detail)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_problem_shape() {
        let body = serde_json::to_value(ErrorResponse::not_found("This post does not exist")).unwrap();
        assert_eq!(
            body,
            json!({
                "type": "about:blank",
                "title": "Not Found",
                "status": 404,
                "detail": "This post does not exist",
                "error": "This post does not exist"
            })
        );
    }

    #[test]
    fn test_detail_omitted_when_absent() {
        let body = serde_json::to_value(ErrorResponse::internal_error()).unwrap();
        assert!(body.get("detail").is_none());
        assert!(body.get("error").is_none());
        assert_eq!(body["status"], 500);
    }

    #[test]
    fn test_message_body() {
        let body = serde_json::to_value(MessageResponse::new("Successfully liked")).unwrap();
        assert_eq!(body, json!({ "message": "Successfully liked" }));
    }
}
