//! Client-side router: route table plus history

use super::history::History;
use super::Navigate;
use crate::logger;
use crate::routing::{Resolved, RouteTable};

/// Resolves every location change through the route table and records it
#[derive(Debug, Clone)]
pub struct Router {
    table: RouteTable,
    history: History,
}

impl Router {
    pub const fn new(table: RouteTable) -> Self {
        Self {
            table,
            history: History::new(),
        }
    }

    /// Resolve `path` and record a history entry for it
    pub fn navigate(&mut self, path: &str) -> &Resolved {
        let resolved = self.table.resolve_or_not_found(path);
        if resolved.is_not_found() {
            logger::log_debug(&format!("[Router] No route for {path}"));
        }
        self.history.push(resolved)
    }

    pub fn current(&self) -> Option<&Resolved> {
        self.history.current()
    }

    pub fn back(&mut self) -> Option<&Resolved> {
        self.history.back()
    }

    pub fn forward(&mut self) -> Option<&Resolved> {
        self.history.forward()
    }

    pub const fn table(&self) -> &RouteTable {
        &self.table
    }

    pub const fn history(&self) -> &History {
        &self.history
    }
}

impl Navigate for Router {
    fn push(&mut self, path: &str) {
        self.navigate(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::View;

    fn router() -> Router {
        Router::new(RouteTable::books().unwrap())
    }

    #[test]
    fn test_navigate_records_history() {
        let mut router = router();
        router.navigate("/books");
        let current = router.navigate("/books/dune");
        assert_eq!(current.view, View::Book);
        assert_eq!(current.params.get("bookName"), Some("dune"));
        assert_eq!(router.history().len(), 2);

        assert_eq!(router.back().unwrap().view, View::Books);
        assert_eq!(router.forward().unwrap().view, View::Book);
    }

    #[test]
    fn test_unknown_path_navigates_to_not_found() {
        let mut router = router();
        let current = router.navigate("/nowhere");
        assert_eq!(current.view, View::NotFound);
        assert_eq!(router.history().len(), 1);
    }

    #[test]
    fn test_navigate_trait_push() {
        let mut router = router();
        Navigate::push(&mut router, "/login");
        assert_eq!(router.current().unwrap().view, View::Login);
    }
}
