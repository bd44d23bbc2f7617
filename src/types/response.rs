use serde::{Deserialize, Serialize};

use crate::errors::AppResult;

/// Uniform response envelope returned by every service operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }

    /// Fold a service result into an envelope.
    ///
    /// Domain errors keep their message; internal errors are logged and
    /// replaced by `fallback`.
    pub fn from_result(result: AppResult<T>, fallback: &str) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(e) => Self::failure(e.user_message(fallback)),
        }
    }

    /// Attach a message only when the envelope is a success
    pub fn on_success(mut self, message: impl Into<String>) -> Self {
        if self.success {
            self.message = Some(message.into());
        }
        self
    }

    /// True if this is a failure carrying exactly `error`
    pub fn failed_with(&self, error: &str) -> bool {
        !self.success && self.error.as_deref() == Some(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    #[test]
    fn test_success_envelope_skips_empty_fields() {
        let json = serde_json::to_value(ApiResponse::success(1)).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true, "data": 1 }));
    }

    #[test]
    fn test_failure_envelope() {
        let json = serde_json::to_value(ApiResponse::<()>::failure("User not found")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": false, "error": "User not found" })
        );
    }

    #[test]
    fn test_on_success_ignored_for_failures() {
        let response: ApiResponse<u8> =
            ApiResponse::from_result(Err(AppError::NotFound("User")), "Failed")
                .on_success("User created successfully");
        assert!(response.message.is_none());
        assert!(response.failed_with("User not found"));
    }
}
