//! Page location value object.

use std::collections::HashMap;

/// Path and query string of the page the current load is running on.
///
/// Callback-route detection and return-target capture are pure functions of
/// this value, so it is passed explicitly into the session resolver rather
/// than read from a page global.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageLocation {
    path: String,
    query: HashMap<String, String>,
}

impl PageLocation {
    /// Creates a location for the given path with an empty query string.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: HashMap::new(),
        }
    }

    /// Adds a query parameter, replacing any existing value for the name.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Returns the path component.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns a query parameter value, if present.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Returns true if the query carries an authorization code and state,
    /// i.e. the provider has redirected back to us mid-login.
    pub fn has_authorization_response(&self) -> bool {
        self.query_param("code").is_some() && self.query_param("state").is_some()
    }
}
