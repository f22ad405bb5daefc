//! Request descriptor: everything needed to issue one call.

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;

use reqwest::Url;
use serde_json::Value;

use super::query::Query;
use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }

    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One outbound call. Built per operation and consumed by
/// [`crate::net::api::ApiClient::send`].
#[derive(Clone, Debug, PartialEq)]
pub struct RequestDescriptor {
    path: String,
    /// Caller-supplied path segments appended after `path`, each escaped.
    segments: Vec<String>,
    method: Method,
    query: Query,
    body: Option<Value>,
}

impl RequestDescriptor {
    /// `path` is relative to the origin and must start with `/`.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { path: path.into(), segments: Vec::new(), method, query: Query::new(), body: None }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Append one path segment. `/`, `?`, `#` and other reserved characters
    /// are percent-encoded, so the value can never leave its segment.
    #[must_use]
    pub fn with_segment(mut self, segment: impl ToString) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    #[must_use]
    pub fn query(&self) -> &Query {
        &self.query
    }

    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Absolute URL: `origin + path`, then the escaped segments, followed by
    /// `?query` when the query is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidOrigin`] if the joined string is not a URL.
    pub fn url(&self, origin: &str) -> Result<Url, ApiError> {
        let joined = format!("{origin}{}", self.path);
        let mut url = Url::parse(&joined).map_err(|_| ApiError::InvalidOrigin(joined.clone()))?;
        if !self.segments.is_empty() {
            url.path_segments_mut().map_err(|()| ApiError::InvalidOrigin(joined))?.extend(&self.segments);
        }
        self.query.append_to(&mut url);
        Ok(url)
    }
}
