//! Field error and form error summary announcements.

use herald_core::logging::targets;

use super::plural_suffix;
use crate::live_region::Announcer;

/// Heading used by [`FormErrorSummary`] when none is given.
pub const DEFAULT_SUMMARY_TITLE: &str = "Please correct the following errors:";

/// Speaks a single field's validation error.
///
/// Each new non-empty error is announced assertively as `"Error: {error}"`.
/// An error equal to the last announced one is not repeated, even if the
/// field was valid in between.
#[derive(Debug, Clone)]
pub struct FieldErrorAnnouncer {
    announcer: Announcer,
    enabled: bool,
    previous: Option<String>,
}

impl FieldErrorAnnouncer {
    pub fn new(announcer: Announcer) -> Self {
        Self {
            announcer,
            enabled: true,
            previous: None,
        }
    }

    /// Enable or disable announcing. Forms that rely on a summary turn this off.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Feed the field's current error. Returns `true` if it was announced.
    pub fn update(&mut self, error: Option<&str>) -> bool {
        let Some(error) = error.filter(|e| !e.is_empty()) else {
            return false;
        };
        if !self.enabled || self.previous.as_deref() == Some(error) {
            return false;
        }

        self.announcer.announce_assertive(format!("Error: {error}"));
        self.previous = Some(error.to_owned());
        true
    }
}

/// Speaks the number of errors in a form.
///
/// Announces `"Form has {n} error(s). {title}"` assertively whenever the
/// count of non-empty errors or the title changes and the count is not zero.
/// Updates that change neither stay silent.
#[derive(Debug, Clone)]
pub struct FormErrorSummary {
    announcer: Announcer,
    title: String,
    last: Option<(usize, String)>,
}

impl FormErrorSummary {
    pub fn new(announcer: Announcer) -> Self {
        Self {
            announcer,
            title: DEFAULT_SUMMARY_TITLE.to_owned(),
            last: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// The announcement text for `count` errors.
    pub fn message(&self, count: usize) -> String {
        format!(
            "Form has {count} error{}. {}",
            plural_suffix(count),
            self.title
        )
    }

    /// Feed the form's current error messages. Empty messages do not count.
    /// Returns `true` if an announcement was made.
    pub fn update<I, S>(&mut self, errors: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let count = errors
            .into_iter()
            .filter(|e| !e.as_ref().is_empty())
            .count();

        if self
            .last
            .as_ref()
            .is_some_and(|(n, title)| *n == count && *title == self.title)
        {
            return false;
        }
        self.last = Some((count, self.title.clone()));

        if count == 0 {
            return false;
        }
        tracing::debug!(target: targets::FEEDBACK, count, "form error summary");
        self.announcer.announce_assertive(self.message(count));
        true
    }
}
