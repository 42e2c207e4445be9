//! HTTP protocol layer module
//!
//! Response builders and request body reading shared by the frontend host
//! and the demo server.

pub mod body;
pub mod response;

// Re-export commonly used types
pub use body::{read_body, BodyError};
pub use response::{
    build_404_response, build_405_response, build_413_response, build_error_response,
    build_health_response, build_html_response, build_json_response, build_options_response,
    build_redirect_response, build_response, build_text_response, HttpResponse,
};
