//! Credential extraction middleware

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::credential::CredentialToken;

/// Extractor for the caller's credential token
///
/// Accepts either:
/// - Authorization header: `Bearer <token>`
/// - X-API-Key header: `<token>`
///
/// Extraction only; resolution against the credential store happens in the
/// handler so that an unknown token maps to 401 there.
#[derive(Debug, Clone)]
pub struct BearerToken(pub CredentialToken);

impl FromRequestParts<AppState> for BearerToken {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token_from_headers(&parts.headers)?;
        Ok(BearerToken(CredentialToken::new(token)))
    }
}

fn extract_token_from_headers(headers: &axum::http::HeaderMap) -> Result<String, ApiError> {
    // Try Authorization header first (Bearer token)
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| ApiError::bad_request("Invalid Authorization header encoding"))?;

        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(token.trim().to_string());
        }
    }

    // Try X-API-Key header
    if let Some(key_header) = headers.get("x-api-key") {
        let key = key_header
            .to_str()
            .map_err(|_| ApiError::bad_request("Invalid X-API-Key header encoding"))?;

        return Ok(key.trim().to_string());
    }

    Err(ApiError::unauthorized(
        "Credential required. Provide via 'Authorization: Bearer <token>' or 'X-API-Key: <token>' header",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer sk_test123".parse().unwrap());

        let result = extract_token_from_headers(&headers);
        assert_eq!(result.unwrap(), "sk_test123");
    }

    #[test]
    fn test_extract_x_api_key() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", "sk_test456".parse().unwrap());

        let result = extract_token_from_headers(&headers);
        assert_eq!(result.unwrap(), "sk_test456");
    }

    #[test]
    fn test_bearer_takes_precedence() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer sk_bearer".parse().unwrap());
        headers.insert("x-api-key", "sk_x_api_key".parse().unwrap());

        let result = extract_token_from_headers(&headers);
        assert_eq!(result.unwrap(), "sk_bearer");
    }

    #[test]
    fn test_missing_token() {
        let headers = HeaderMap::new();

        let err = extract_token_from_headers(&headers).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_non_bearer_authorization_falls_through() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());

        let result = extract_token_from_headers(&headers);
        assert!(result.is_err());
    }

    #[test]
    fn test_trimmed_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            "Bearer   sk_with_spaces   ".parse().unwrap(),
        );

        let result = extract_token_from_headers(&headers);
        assert_eq!(result.unwrap(), "sk_with_spaces");
    }
}
