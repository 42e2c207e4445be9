//! Outgoing request decoration
//!
//! Builds the POST descriptor attached to every protected API call:
//! JSON body, JSON content type and the session credential.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use hyper::{Method, Request};
use serde::Serialize;

use super::{AuthScheme, Session, SessionError};

/// Fully assembled request descriptor, ready for any HTTP client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoratedRequest {
    pub method: Method,
    /// JSON-serialized payload
    pub body: String,
    pub headers: HeaderMap,
}

impl DecoratedRequest {
    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    /// Convert into a hyper request targeting `uri`
    pub fn into_request(self, uri: &str) -> Result<Request<Full<Bytes>>, SessionError> {
        let mut builder = Request::builder().method(self.method).uri(uri);
        if let Some(headers) = builder.headers_mut() {
            headers.extend(self.headers);
        }
        Ok(builder.body(Full::new(Bytes::from(self.body)))?)
    }
}

/// Decorate `payload` with the current session.
///
/// Pure function of its inputs: identical payload, session and scheme give
/// identical descriptors. The token is not inspected beyond checking that it
/// can travel in a header.
pub fn request_options<T>(
    payload: &T,
    session: &Session,
    scheme: &AuthScheme,
) -> Result<DecoratedRequest, SessionError>
where
    T: Serialize + ?Sized,
{
    let body = serde_json::to_string(payload)?;

    let mut authorization = HeaderValue::from_str(&scheme.header_value(session.token()))
        .map_err(|_| SessionError::InvalidCredential)?;
    authorization.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(AUTHORIZATION, authorization);

    Ok(DecoratedRequest {
        method: Method::POST,
        body,
        headers,
    })
}
