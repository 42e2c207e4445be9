//! Route table module
//!
//! Ordered, first-match resolution of URL paths to views.

use std::collections::HashSet;

use super::pattern::{Params, PathPattern};
use super::view::View;
use super::RouteError;

/// A single route declaration
#[derive(Debug, Clone)]
pub struct RouteEntry {
    /// Unique logical name
    pub name: String,
    pub pattern: PathPattern,
    pub view: View,
}

impl RouteEntry {
    pub fn new(pattern: &str, name: &str, view: View) -> Result<Self, RouteError> {
        Ok(Self {
            name: name.to_string(),
            pattern: PathPattern::parse(pattern)?,
            view,
        })
    }
}

/// Outcome of resolving a path against the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Path as requested
    pub path: String,
    /// Name of the matched entry, `None` for the not-found fallback
    pub route: Option<String>,
    pub view: View,
    pub params: Params,
}

impl Resolved {
    pub fn not_found(path: &str) -> Self {
        Self {
            path: path.to_string(),
            route: None,
            view: View::NotFound,
            params: Params::default(),
        }
    }

    pub const fn is_not_found(&self) -> bool {
        self.route.is_none()
    }
}

/// Immutable ordered list of routes
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Build a table, rejecting duplicate logical names
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self, RouteError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(RouteError::DuplicateName(entry.name.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// The books application table
    pub fn books() -> Result<Self, RouteError> {
        Self::new(vec![
            RouteEntry::new("/", "Home", View::Home)?,
            RouteEntry::new("/login", "Login", View::Login)?,
            RouteEntry::new("/books", "Books", View::Books)?,
            RouteEntry::new("/books/:bookName", "Book", View::Book)?,
            RouteEntry::new("/admin/books", "BookAdmin", View::BookAdmin)?,
            RouteEntry::new("/admin/books/:bookId", "BookEdit", View::BookEdit)?,
        ])
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Resolve a path to the first matching entry
    pub fn resolve(&self, path: &str) -> Option<Resolved> {
        let (entry, params) = match_route(path, &self.entries)?;
        Some(Resolved {
            path: path.to_string(),
            route: Some(entry.name.clone()),
            view: entry.view,
            params,
        })
    }

    /// Resolve a path, falling back to the not-found view
    pub fn resolve_or_not_found(&self, path: &str) -> Resolved {
        self.resolve(path)
            .unwrap_or_else(|| Resolved::not_found(path))
    }

    pub fn by_name(&self, name: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Build the concrete path of a named route
    pub fn href(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouteError> {
        let entry = self
            .by_name(name)
            .ok_or_else(|| RouteError::UnknownRoute(name.to_string()))?;
        entry.pattern.fill(name, params)
    }
}

/// Find the first entry whose pattern matches `path`
pub fn match_route<'a>(path: &str, entries: &'a [RouteEntry]) -> Option<(&'a RouteEntry, Params)> {
    entries
        .iter()
        .find_map(|entry| entry.pattern.matches(path).map(|params| (entry, params)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn books() -> RouteTable {
        RouteTable::books().unwrap()
    }

    #[test]
    fn test_resolve_declared_routes() {
        let table = books();
        let cases = [
            ("/", View::Home),
            ("/login", View::Login),
            ("/books", View::Books),
            ("/books/dune", View::Book),
            ("/admin/books", View::BookAdmin),
            ("/admin/books/42", View::BookEdit),
        ];
        for (path, view) in cases {
            let resolved = table.resolve(path).unwrap();
            assert_eq!(resolved.view, view, "path {path}");
        }
    }

    #[test]
    fn test_resolve_extracts_book_name() {
        let resolved = books().resolve("/books/dune").unwrap();
        assert_eq!(resolved.route.as_deref(), Some("Book"));
        assert_eq!(resolved.params.get("bookName"), Some("dune"));
    }

    #[test]
    fn test_resolve_extracts_book_id() {
        let resolved = books().resolve("/admin/books/42").unwrap();
        assert_eq!(resolved.view, View::BookEdit);
        assert_eq!(resolved.params.get("bookId"), Some("42"));
    }

    #[test]
    fn test_unmatched_path_is_not_found() {
        let table = books();
        assert!(table.resolve("/authors").is_none());
        let resolved = table.resolve_or_not_found("/authors");
        assert!(resolved.is_not_found());
        assert_eq!(resolved.view, View::NotFound);
        assert_eq!(resolved.path, "/authors");
    }

    #[test]
    fn test_match_route_order() {
        let table = RouteTable::new(vec![
            RouteEntry::new("/books/:bookName", "Book", View::Book).unwrap(),
            RouteEntry::new("/books/new", "NewBook", View::BookEdit).unwrap(),
        ])
        .unwrap();

        // Should match first applicable route in order
        let resolved = table.resolve("/books/new").unwrap();
        assert_eq!(resolved.route.as_deref(), Some("Book"));
        assert_eq!(resolved.params.get("bookName"), Some("new"));

        let reversed = RouteTable::new(vec![
            RouteEntry::new("/books/new", "NewBook", View::BookEdit).unwrap(),
            RouteEntry::new("/books/:bookName", "Book", View::Book).unwrap(),
        ])
        .unwrap();
        let resolved = reversed.resolve("/books/new").unwrap();
        assert_eq!(resolved.route.as_deref(), Some("NewBook"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = RouteTable::new(vec![
            RouteEntry::new("/", "Home", View::Home).unwrap(),
            RouteEntry::new("/home", "Home", View::Home).unwrap(),
        ])
        .unwrap_err();
        assert!(matches!(err, RouteError::DuplicateName(name) if name == "Home"));
    }

    #[test]
    fn test_href_round_trip() {
        let table = books();
        let path = table.href("Book", &[("bookName", "dune")]).unwrap();
        assert_eq!(path, "/books/dune");
        assert_eq!(table.resolve(&path).unwrap().view, View::Book);

        assert_eq!(table.href("Home", &[]).unwrap(), "/");
        assert_eq!(table.resolve("//").map(|r| r.view), None);
        assert!(matches!(
            table.href("Missing", &[]),
            Err(RouteError::UnknownRoute(_))
        ));
    }

    #[test]
    fn test_undecodable_book_name_round_trip() {
        let table = books();
        let resolved = table.resolve("/books/%FF").unwrap();
        assert_eq!(resolved.params.get("bookName"), Some("%FF"));
        assert_ne!(
            table.resolve("/books/%FE").unwrap().params.get("bookName"),
            Some("%FF")
        );

        let path = table.href("Book", &[("bookName", "%FF")]).unwrap();
        assert_eq!(path, "/books/%25FF");
        assert_eq!(table.resolve(&path).unwrap().params.get("bookName"), Some("%FF"));
    }
}
