use super::*;

#[test]
fn test_missing_api_key_message() {
    let err = GenerationError::MissingApiKey;
    assert!(err.to_string().contains("API key is required"));
}

#[test]
fn test_api_error_display() {
    let err = GenerationError::ApiError {
        status: 500,
        message: "Internal Server Error".to_string(),
    };
    assert!(err.to_string().contains("500"));
    assert!(err.to_string().contains("Internal Server Error"));
}

#[test]
fn test_failed_is_verbatim() {
    let err = GenerationError::Failed("Failed to generate reply: boom".to_string());
    assert_eq!(err.to_string(), "Failed to generate reply: boom");
}

#[test]
fn test_from_api_response_auth_failed() {
    let err = GenerationError::from_api_response(401, "Invalid API key".to_string());
    assert!(matches!(err, GenerationError::AuthenticationFailed(_)));
}

#[test]
fn test_from_api_response_rate_limited() {
    let err = GenerationError::from_api_response(429, "Rate limit exceeded".to_string());
    assert!(matches!(err, GenerationError::RateLimited { .. }));
}

#[test]
fn test_from_api_response_content_filtered() {
    let err = GenerationError::from_api_response(400, "Content filter triggered".to_string());
    assert!(matches!(err, GenerationError::ContentFiltered(_)));
}

#[test]
fn test_from_api_response_invalid_request() {
    let err = GenerationError::from_api_response(400, "Unknown model".to_string());
    assert!(matches!(err, GenerationError::InvalidRequest(_)));
}

#[test]
fn test_from_api_response_generic_error() {
    let err = GenerationError::from_api_response(502, "Bad Gateway".to_string());
    assert!(matches!(err, GenerationError::ApiError { status: 502, .. }));
}

#[test]
fn test_is_retryable() {
    assert!(GenerationError::RateLimited { retry_after_seconds: 5 }.is_retryable());
    assert!(GenerationError::Network("reset".to_string()).is_retryable());
    assert!(GenerationError::EmptyCompletion("No reply generated".to_string()).is_retryable());
    assert!(!GenerationError::MissingApiKey.is_retryable());
    assert!(!GenerationError::AuthenticationFailed("bad".to_string()).is_retryable());
}
