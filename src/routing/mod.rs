//! Routing module
//!
//! Client-side route table for the books application:
//! - Path patterns with named parameter segments (`/books/:bookName`)
//! - Ordered, first-match resolution
//! - Explicit not-found fallback

mod matcher;
mod pattern;
mod view;

pub use matcher::{match_route, Resolved, RouteEntry, RouteTable};
pub use pattern::{Params, PathPattern, Segment};
pub use view::View;

/// Errors raised while building or querying a route table
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("duplicate route name: {0}")]
    DuplicateName(String),
    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidPattern {
        pattern: String,
        reason: &'static str,
    },
    #[error("unknown route: {0}")]
    UnknownRoute(String),
    #[error("route {route} requires parameter '{param}'")]
    MissingParam { route: String, param: String },
}
