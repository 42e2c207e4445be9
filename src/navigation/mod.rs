//! Navigation module
//!
//! History-backed client-side navigation over the route table.

mod history;
mod router;

pub use history::History;
pub use router::Router;

/// Capability to move the application to another location
pub trait Navigate {
    fn push(&mut self, path: &str);
}
