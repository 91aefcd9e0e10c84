use serde::Serialize;

/// JSON envelope shared by every endpoint.
///
/// Absent fields are omitted, so a bare success looks like
/// `{"success": true, "message": "..."}`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T = ()> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
            count: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// List payload with `count` set to the number of rows
    pub fn list(data: Vec<T>) -> Self {
        let count = data.len();
        Self {
            count: Some(count),
            ..Self::ok(data)
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            error: None,
            count: None,
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
            count: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_envelope_omits_empty_fields() {
        let body = serde_json::to_value(ApiResponse::error("User not found.")).unwrap();
        assert_eq!(body, json!({ "success": false, "error": "User not found." }));
    }

    #[test]
    fn test_list_envelope_carries_count() {
        let body = serde_json::to_value(ApiResponse::list(vec![1, 2, 3])).unwrap();
        assert_eq!(body, json!({ "success": true, "data": [1, 2, 3], "count": 3 }));
    }

    #[test]
    fn test_data_with_message() {
        let body =
            serde_json::to_value(ApiResponse::ok("x").with_message("Created.")).unwrap();
        assert_eq!(
            body,
            json!({ "success": true, "data": "x", "message": "Created." })
        );
    }
}
