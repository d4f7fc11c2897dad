//! Request/response models and the transport contract the client sends through.

use std::{future::Future, pin::Pin};

use serde::{de::DeserializeOwned, Serialize};

use crate::{files::types::FileContent, ApiError};

/// Object-safe boxed future used by [`HttpTransport`].
pub type TransportFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Header carrying the access token.
pub const AUTHORIZATION_HEADER: &str = "Authorization";
/// Header declaring the body format.
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
/// Body format used by every API call.
pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// HTTP verbs used by the API surface.
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Wire name of the method.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// `multipart/form-data` body: text fields followed by file parts.
pub struct MultipartForm {
    /// Text fields as `(name, value)`.
    pub fields: Vec<(String, String)>,
    /// File parts as `(field name, content)`.
    pub files: Vec<(String, FileContent)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request payload.
pub enum RequestBody {
    /// Serialized JSON.
    Json(String),
    /// Form upload. The transport sets the multipart `Content-Type` with its boundary.
    Multipart(MultipartForm),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// How the transport should read a successful response body.
pub enum ResponseKind {
    /// Body as UTF-8 text in [`HttpResponse::body`].
    #[default]
    Text,
    /// Raw bytes in [`HttpResponse::bytes`].
    Binary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outgoing request relative to the configured base URL.
pub struct HttpRequest {
    /// Verb.
    pub method: HttpMethod,
    /// Absolute path such as `/api/files`.
    pub path: String,
    /// Query parameters, appended in order.
    pub query: Vec<(String, String)>,
    /// Request headers, set in order (later entries win).
    pub headers: Vec<(String, String)>,
    /// Payload, if any.
    pub body: Option<RequestBody>,
    /// Expected response body format.
    pub response_kind: ResponseKind,
    /// Exempts the request from the refresh-and-replay flow.
    pub skip_auth_refresh: bool,
}

impl HttpRequest {
    /// Creates a request without query, headers or body.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            response_kind: ResponseKind::Text,
            skip_auth_refresh: false,
        }
    }

    /// Shorthand for a `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Shorthand for a `POST` request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Shorthand for a `PUT` request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// Shorthand for a `DELETE` request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Adds a query parameter.
    pub fn with_query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// Marks the request as exempt from token refresh (sign-in, the refresh call itself).
    pub fn skip_auth_refresh(mut self) -> Self {
        self.skip_auth_refresh = true;
        self
    }

    /// Serializes `body` as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] when serialization fails.
    pub fn with_json<T: Serialize>(mut self, body: &T) -> Result<Self, ApiError> {
        let raw = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.body = Some(RequestBody::Json(raw));
        Ok(self)
    }

    /// Attaches a multipart form body.
    pub fn with_multipart(mut self, form: MultipartForm) -> Self {
        self.body = Some(RequestBody::Multipart(form));
        self
    }

    /// Asks the transport for the raw response bytes.
    pub fn expect_binary(mut self) -> Self {
        self.response_kind = ResponseKind::Binary;
        self
    }

    /// JSON body text, if the body is JSON.
    pub fn json_body(&self) -> Option<&str> {
        match &self.body {
            Some(RequestBody::Json(raw)) => Some(raw),
            _ => None,
        }
    }

    /// Returns `true` for multipart bodies.
    pub fn is_multipart(&self) -> bool {
        matches!(self.body, Some(RequestBody::Multipart(_)))
    }

    /// Sets a header, replacing an existing header with the same (case-insensitive) name.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some(slot) => slot.1 = value,
            None => self.headers.push((name.to_string(), value)),
        }
    }

    /// Returns the value of a header, if set.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Response as seen by the client.
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Body text (empty when the server sent none, or for binary responses).
    pub body: String,
    /// Body bytes of a [`ResponseKind::Binary`] response.
    pub bytes: Vec<u8>,
    /// `Content-Type` reported by the server.
    pub content_type: Option<String>,
}

impl HttpResponse {
    /// Builds a text response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            bytes: Vec::new(),
            content_type: None,
        }
    }

    /// Builds a binary response.
    pub fn binary(status: u16, bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            ..Self::new(status, "")
        }
    }

    /// Sets the reported `Content-Type`.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// `2xx` check.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] when the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Converts a non-success response into [`ApiError::Status`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] for non-`2xx` statuses.
    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Status {
                status: self.status,
                body: self.body,
            })
        }
    }
}

/// Sends fully-prepared requests; implemented by the browser `fetch` adapter and test doubles.
pub trait HttpTransport {
    /// Sends one request to `url` and resolves with the raw response.
    ///
    /// Non-success statuses are still `Ok`; only failures to obtain a response are errors.
    fn send<'a>(
        &'a self,
        url: String,
        request: HttpRequest,
    ) -> TransportFuture<'a, Result<HttpResponse, ApiError>>;
}

/// Encodes query parameters as a `key=value&...` string with percent-escaping.
pub fn encode_query(query: &[(String, String)]) -> String {
    query
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Appends encoded query parameters to a URL.
pub fn url_with_query(url: &str, query: &[(String, String)]) -> String {
    if query.is_empty() {
        url.to_string()
    } else {
        format!("{url}?{}", encode_query(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_header_replaces_case_insensitively() {
        let mut request = HttpRequest::get("/api/files");
        request.set_header("authorization", "Bearer a");
        request.set_header(AUTHORIZATION_HEADER, "Bearer b");
        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.header("AUTHORIZATION"), Some("Bearer b"));
    }

    #[test]
    fn encode_query_escapes_reserved_characters() {
        let query = vec![
            ("path".to_string(), "/My Docs/a&b.txt".to_string()),
            ("x".to_string(), "é".to_string()),
        ];
        assert_eq!(
            encode_query(&query),
            "path=%2FMy%20Docs%2Fa%26b.txt&x=%C3%A9"
        );
        assert_eq!(url_with_query("http://h/api", &[]), "http://h/api");
    }

    #[test]
    fn error_for_status_keeps_body() {
        let err = HttpResponse::new(404, "missing")
            .error_for_status()
            .expect_err("404");
        assert_eq!(
            err,
            ApiError::Status {
                status: 404,
                body: "missing".to_string()
            }
        );
        assert!(HttpResponse::new(204, "").error_for_status().is_ok());
    }
}
