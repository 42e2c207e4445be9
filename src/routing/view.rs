//! Views the route table can select

use std::fmt;

/// Target view of a route entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Login,
    Books,
    Book,
    BookAdmin,
    BookEdit,
    /// Rendered for any path no entry matches
    NotFound,
}

impl View {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Login => "Login",
            Self::Books => "Books",
            Self::Book => "Book",
            Self::BookAdmin => "BookAdmin",
            Self::BookEdit => "BookEdit",
            Self::NotFound => "NotFound",
        }
    }

    /// Whether the view must pass the session guard before rendering
    pub const fn requires_auth(self) -> bool {
        matches!(self, Self::BookAdmin | Self::BookEdit)
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Books Library",
            Self::Login => "Login",
            Self::Books => "All Books",
            Self::Book => "Book",
            Self::BookAdmin => "Manage Books",
            Self::BookEdit => "Edit Book",
            Self::NotFound => "Page Not Found",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
