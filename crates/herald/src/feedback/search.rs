//! Search box and result announcements.

use super::plural_suffix;
use crate::live_region::Announcer;

/// Polite announcements for a search box and its results.
#[derive(Debug, Clone)]
pub struct SearchAnnouncements {
    announcer: Announcer,
}

impl SearchAnnouncements {
    pub fn new(announcer: Announcer) -> Self {
        Self { announcer }
    }

    /// The user submitted `query`. Blank queries are not searched and return
    /// `false`.
    pub fn submitted(&self, query: &str) -> bool {
        if query.trim().is_empty() {
            return false;
        }
        self.announcer
            .announce_polite(format!("Searching for {query}"));
        true
    }

    /// The query was cleared.
    pub fn cleared(&self) {
        self.announcer.announce_polite("Search cleared");
    }

    /// Results for `query` finished loading.
    pub fn results_loaded(&self, query: &str, count: usize) {
        self.announcer.announce_polite(Self::results_message(query, count));
    }

    pub fn results_message(query: &str, count: usize) -> String {
        if count == 0 {
            format!("No results found for {query}")
        } else {
            format!("Found {count} result{} for {query}", plural_suffix(count))
        }
    }
}
