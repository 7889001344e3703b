//! Console route table.

#[cfg(test)]
#[path = "route_test.rs"]
mod route_test;

use std::fmt;

/// Pages under the `/admin` shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminPage {
    Dashboard,
    Authors,
    Books,
    Categories,
    Publishers,
}

impl AdminPage {
    /// Sidebar order.
    pub const ALL: [AdminPage; 5] = [Self::Dashboard, Self::Authors, Self::Books, Self::Categories, Self::Publishers];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Authors => "Authors",
            Self::Books => "Books",
            Self::Categories => "Categories",
            Self::Publishers => "Publishers",
        }
    }

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/admin",
            Self::Authors => "/admin/authors",
            Self::Books => "/admin/books",
            Self::Categories => "/admin/categories",
            Self::Publishers => "/admin/publishers",
        }
    }

    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "authors" => Some(Self::Authors),
            "books" => Some(Self::Books),
            "categories" => Some(Self::Categories),
            "publishers" => Some(Self::Publishers),
            _ => None,
        }
    }
}

/// A navigable location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`, which forwards to the admin landing page.
    Root,
    Login,
    Admin(AdminPage),
    /// Any path outside the table; keeps the normalized path for display.
    NotFound(String),
}

/// How a route is gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Open,
    PublicOnly,
    Protected { require_admin: bool },
}

impl Route {
    /// Parse a location. Matching ignores case, query strings, fragments and
    /// trailing slashes.
    #[must_use]
    pub fn parse(location: &str) -> Self {
        let path = location.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let lowered: Vec<String> = segments.iter().map(|s| s.to_lowercase()).collect();
        let lowered: Vec<&str> = lowered.iter().map(String::as_str).collect();

        match lowered.as_slice() {
            [] => Self::Root,
            ["login"] => Self::Login,
            ["admin"] => Self::Admin(AdminPage::Dashboard),
            ["admin", page] => AdminPage::from_segment(page).map_or_else(|| Self::not_found(&segments), Self::Admin),
            _ => Self::not_found(&segments),
        }
    }

    fn not_found(segments: &[&str]) -> Self {
        Self::NotFound(format!("/{}", segments.join("/")))
    }

    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Root => "/",
            Self::Login => "/login",
            Self::Admin(page) => page.path(),
            Self::NotFound(path) => path,
        }
    }

    #[must_use]
    pub fn access(&self) -> Access {
        match self {
            Self::Root | Self::NotFound(_) => Access::Open,
            Self::Login => Access::PublicOnly,
            Self::Admin(_) => Access::Protected { require_admin: true },
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
