//! Navigation state: the current location and the routes it resolves to.

pub const DASHBOARD_PATH: &str = "/";
const REPOSITORY_PREFIX: &str = "/repositories/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn repository(identifier: &str) -> Self {
        Self::new(format!("{}{}", REPOSITORY_PREFIX, identifier))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Repository(String),
}

impl Route {
    /// Everything after `/repositories/` is the identifier, slashes included.
    /// Unknown paths fall back to the dashboard.
    pub fn parse(location: &Location) -> Self {
        match location.path().strip_prefix(REPOSITORY_PREFIX) {
            Some(identifier) if !identifier.is_empty() => Route::Repository(identifier.to_string()),
            _ => Route::Dashboard,
        }
    }

    pub fn repository_param(&self) -> Option<&str> {
        match self {
            Route::Repository(identifier) => Some(identifier),
            Route::Dashboard => None,
        }
    }
}

/// Owns the current location. Views read it, only navigation writes it.
#[derive(Debug, Clone)]
pub struct Navigator {
    location: Location,
}

impl Navigator {
    pub fn new(location: Location) -> Self {
        Self { location }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn route(&self) -> Route {
        Route::parse(&self.location)
    }

    /// Returns true if the location actually changed
    pub fn navigate(&mut self, location: Location) -> bool {
        if self.location == location {
            return false;
        }
        self.location = location;
        true
    }
}
