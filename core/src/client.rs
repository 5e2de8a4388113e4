//! Stateless HTTP request builder and response parser for the CacheFly API.
//!
//! # Design
//! `CacheflyClient` holds only a base URL and an optional token and carries no
//! mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`. Builders check the resource identifier up front, so an
//! empty id fails before any request exists.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Account, LegacyApiKey, OptionsMetadata, ServiceOptions};

/// Synchronous, stateless client for the CacheFly v2.5 API.
#[derive(Debug, Clone)]
pub struct CacheflyClient {
    base_url: String,
    token: Option<String>,
}

impl CacheflyClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Attach a bearer token to every request built from now on.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn request(&self, method: HttpMethod, path: &str, body: Option<String>) -> HttpRequest {
        let mut headers = Vec::new();
        if let Some(token) = &self.token {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers,
            body,
        }
    }

    // --- accounts ---

    pub fn build_get_current_account(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/accounts/me", None)
    }

    pub fn build_get_account(&self, id: &str) -> Result<HttpRequest, ApiError> {
        require_id(id)?;
        Ok(self.request(HttpMethod::Get, &format!("/accounts/{id}"), None))
    }

    pub fn parse_get_account(&self, response: HttpResponse) -> Result<Account, ApiError> {
        check_status(&response, &[200])?;
        decode(&response)
    }

    // --- service options ---

    pub fn build_get_options(&self, service_id: &str) -> Result<HttpRequest, ApiError> {
        require_id(service_id)?;
        Ok(self.request(
            HttpMethod::Get,
            &format!("/services/{service_id}/options"),
            None,
        ))
    }

    pub fn parse_get_options(&self, response: HttpResponse) -> Result<ServiceOptions, ApiError> {
        check_status(&response, &[200])?;
        decode(&response)
    }

    pub fn build_get_options_metadata(&self, service_id: &str) -> Result<HttpRequest, ApiError> {
        require_id(service_id)?;
        Ok(self.request(
            HttpMethod::Get,
            &format!("/services/{service_id}/options/metadata"),
            None,
        ))
    }

    pub fn parse_get_options_metadata(
        &self,
        response: HttpResponse,
    ) -> Result<OptionsMetadata, ApiError> {
        check_status(&response, &[200])?;
        decode(&response)
    }

    pub fn build_update_options(
        &self,
        service_id: &str,
        options: &ServiceOptions,
    ) -> Result<HttpRequest, ApiError> {
        require_id(service_id)?;
        let body =
            serde_json::to_string(options).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(self.request(
            HttpMethod::Put,
            &format!("/services/{service_id}/options"),
            Some(body),
        ))
    }

    pub fn parse_update_options(&self, response: HttpResponse) -> Result<ServiceOptions, ApiError> {
        check_status(&response, &[200])?;
        decode(&response)
    }

    // --- legacy API key ---

    pub fn build_get_legacy_api_key(&self, service_id: &str) -> Result<HttpRequest, ApiError> {
        require_id(service_id)?;
        Ok(self.request(
            HttpMethod::Get,
            &format!("/services/{service_id}/options/apikey"),
            None,
        ))
    }

    pub fn parse_get_legacy_api_key(&self, response: HttpResponse) -> Result<LegacyApiKey, ApiError> {
        check_status(&response, &[200])?;
        decode(&response)
    }

    pub fn build_regenerate_legacy_api_key(
        &self,
        service_id: &str,
    ) -> Result<HttpRequest, ApiError> {
        require_id(service_id)?;
        Ok(self.request(
            HttpMethod::Post,
            &format!("/services/{service_id}/options/apikey"),
            None,
        ))
    }

    pub fn parse_regenerate_legacy_api_key(
        &self,
        response: HttpResponse,
    ) -> Result<LegacyApiKey, ApiError> {
        check_status(&response, &[201, 200])?;
        decode(&response)
    }

    pub fn build_delete_legacy_api_key(&self, service_id: &str) -> Result<HttpRequest, ApiError> {
        require_id(service_id)?;
        Ok(self.request(
            HttpMethod::Delete,
            &format!("/services/{service_id}/options/apikey"),
            None,
        ))
    }

    pub fn parse_delete_legacy_api_key(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, &[204, 200])?;
        Ok(())
    }
}

fn require_id(id: &str) -> Result<(), ApiError> {
    if id.is_empty() {
        return Err(ApiError::MissingId);
    }
    Ok(())
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: &[u16]) -> Result<(), ApiError> {
    if expected.contains(&response.status) {
        return Ok(());
    }
    match response.status {
        404 => Err(ApiError::NotFound),
        401 | 403 => Err(ApiError::Unauthorized {
            status: response.status,
            body: response.body.clone(),
        }),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
