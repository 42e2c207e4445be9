//! Demo server
//!
//! Four endpoints showing plain GET handling and POST body parsing:
//! - `GET /`          welcome text
//! - `GET /get`       JSON greeting
//! - `POST /post`     echo of the parsed body
//! - `POST /post-form` echo of the parsed body
//!
//! Bodies are parsed according to `Content-Type`: JSON objects/arrays, or
//! URL-encoded forms with bracket nesting (`a[b]=1`, `tags[]=x`). Any other
//! content type parses to an empty object.

use hyper::body::{Body, Bytes};
use hyper::header::CONTENT_TYPE;
use hyper::{Method, Request, StatusCode};
use serde_json::{Map, Value};

use crate::config::AppState;
use crate::http::body::declared_too_large;
use crate::http::{self, BodyError, HttpResponse};
use crate::logger;

pub const WELCOME: &str = "Welcome to LearnCodeOnline server";
pub const GREETING: &str = "Hello from learnCodeOnline.in";

/// Entry point for demo server requests
pub async fn handle<B>(req: Request<B>, state: &AppState) -> HttpResponse
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let enable_cors = state.config.http.enable_cors;

    match (&method, path.as_str()) {
        (&Method::GET | &Method::HEAD, "/") => {
            http::build_response(
                StatusCode::OK,
                "text/plain; charset=utf-8",
                WELCOME,
                method == Method::HEAD,
            )
        }
        (&Method::GET | &Method::HEAD, "/get") => {
            http::build_json_response(StatusCode::OK, &serde_json::json!({ "message": GREETING }))
        }
        (&Method::POST, "/post" | "/post-form") => {
            echo_body(req, state.config.http.max_body_size).await
        }
        (&Method::OPTIONS, "/" | "/get") => http::build_options_response("GET, HEAD, OPTIONS", enable_cors),
        (&Method::OPTIONS, "/post" | "/post-form") => {
            http::build_options_response("POST, OPTIONS", enable_cors)
        }
        (_, "/" | "/get") => http::build_405_response("GET, HEAD, OPTIONS"),
        (_, "/post" | "/post-form") => http::build_405_response("POST, OPTIONS"),
        _ => http::build_404_response(),
    }
}

/// Read, parse and echo the request body
async fn echo_body<B>(req: Request<B>, max_body_size: u64) -> HttpResponse
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    if declared_too_large(req.headers(), max_body_size) {
        return http::build_413_response();
    }

    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let bytes = match http::read_body(req.into_body(), max_body_size).await {
        Ok(bytes) => bytes,
        Err(BodyError::TooLarge(_)) => return http::build_413_response(),
        Err(e) => {
            logger::log_warning(&e.to_string());
            return http::build_error_response(StatusCode::BAD_REQUEST, &e.to_string());
        }
    };

    match parse_body(content_type.as_deref(), &bytes) {
        Ok(value) => http::build_json_response(StatusCode::OK, &value),
        Err(message) => {
            logger::log_debug(&format!("[Demo] Rejected body: {message}"));
            http::build_error_response(StatusCode::BAD_REQUEST, &message)
        }
    }
}

/// Parse a request body according to its content type
pub fn parse_body(content_type: Option<&str>, bytes: &[u8]) -> Result<Value, String> {
    let mime = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase())
        .unwrap_or_default();

    if mime == "application/json" || mime.ends_with("+json") {
        parse_json(bytes)
    } else if mime == "application/x-www-form-urlencoded" {
        Ok(parse_form(bytes))
    } else {
        Ok(Value::Object(Map::new()))
    }
}

/// Strict JSON: only objects and arrays are accepted; empty means `{}`
fn parse_json(bytes: &[u8]) -> Result<Value, String> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => Ok(value),
        Ok(_) => Err("JSON body must be an object or an array".to_string()),
        Err(e) => Err(format!("Invalid JSON: {e}")),
    }
}

/// Form fields as strings; repeated keys collect into an array
///
/// Bracketed keys nest: `a[b]=1` gives `{"a":{"b":"1"}}` and `a[]=1` appends
/// to an array. A key that cannot nest (malformed brackets, or a clash with an
/// existing string value) is stored as written.
fn parse_form(bytes: &[u8]) -> Value {
    let mut fields = Map::new();
    for (key, value) in url::form_urlencoded::parse(bytes) {
        let value = Value::String(value.into_owned());
        match key_path(&key) {
            Some(path) if insert_nested(&mut fields, &path, value.clone()) => {}
            _ => insert_repeated(&mut fields, &key, value),
        }
    }
    Value::Object(fields)
}

/// Split `a[b][]` into `["a", "b", ""]`; `None` for flat or malformed keys
fn key_path(key: &str) -> Option<Vec<&str>> {
    let open = key.find('[')?;
    if open == 0 {
        return None;
    }
    let mut path = vec![&key[..open]];
    let mut rest = &key[open..];
    while !rest.is_empty() {
        let inner = rest.strip_prefix('[')?;
        let close = inner.find(']')?;
        let part = &inner[..close];
        if part.contains('[') {
            return None;
        }
        path.push(part);
        rest = &inner[close + 1..];
    }
    Some(path)
}

/// Insert under a bracket path; `false` when an existing value is in the way
fn insert_nested(target: &mut Map<String, Value>, path: &[&str], value: Value) -> bool {
    let (key, rest) = match path {
        [] => return false,
        [key] => {
            insert_repeated(target, key, value);
            return true;
        }
        [key, rest @ ..] => (*key, rest),
    };

    if rest[0].is_empty() {
        let slot = target
            .entry(key.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        let item = if rest.len() == 1 {
            value
        } else {
            let mut inner = Map::new();
            if !insert_nested(&mut inner, &rest[1..], value) {
                return false;
            }
            Value::Object(inner)
        };
        return match slot {
            Value::Array(items) => {
                items.push(item);
                true
            }
            _ => false,
        };
    }

    match target
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()))
    {
        Value::Object(inner) => insert_nested(inner, rest, value),
        _ => false,
    }
}

/// Insert a flat key; a repeated key turns into an array of its values
fn insert_repeated(target: &mut Map<String, Value>, key: &str, value: Value) {
    match target.get_mut(key) {
        Some(Value::Array(values)) => values.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            target.insert(key.to_string(), value);
        }
    }
}
