//! Announcement producers for common page widgets.
//!
//! These are the state machines behind error messages, form error
//! summaries and search boxes. Each one holds an [`Announcer`] and decides
//! from successive state updates when, and with what text, to speak.
//!
//! [`Announcer`]: crate::live_region::Announcer

mod errors;
mod search;

pub use errors::{DEFAULT_SUMMARY_TITLE, FieldErrorAnnouncer, FormErrorSummary};
pub use search::SearchAnnouncements;

/// `"s"` unless `count` is exactly one.
pub(crate) fn plural_suffix(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
