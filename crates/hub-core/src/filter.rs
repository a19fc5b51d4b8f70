//! Search and status filtering for already-fetched lists.

use serde::Deserialize;

/// Something a list screen can search and filter.
pub trait Searchable {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn status(&self) -> &str;
}

/// Query parameters shared by the agents and requests screens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListFilter {
    /// Case-insensitive substring matched against name or description.
    #[serde(default)]
    pub search: Option<String>,
    /// Exact status; `all` or absent matches everything.
    #[serde(default)]
    pub status: Option<String>,
}

impl ListFilter {
    pub fn new(search: Option<&str>, status: Option<&str>) -> Self {
        Self {
            search: search.map(str::to_string),
            status: status.map(str::to_string),
        }
    }

    /// Whether `item` passes both the search and the status filter.
    pub fn matches<T: Searchable>(&self, item: &T) -> bool {
        self.matches_search(item) && self.matches_status(item)
    }

    /// Keep only the items that match.
    pub fn apply<T: Searchable>(&self, items: Vec<T>) -> Vec<T> {
        items.into_iter().filter(|item| self.matches(item)).collect()
    }

    fn matches_search<T: Searchable>(&self, item: &T) -> bool {
        let query = match self.search.as_deref() {
            Some(q) if !q.is_empty() => q.to_lowercase(),
            _ => return true,
        };

        item.name().to_lowercase().contains(&query)
            || item.description().to_lowercase().contains(&query)
    }

    fn matches_status<T: Searchable>(&self, item: &T) -> bool {
        match self.status.as_deref() {
            None | Some("") | Some("all") => true,
            Some(status) => item.status() == status,
        }
    }
}
