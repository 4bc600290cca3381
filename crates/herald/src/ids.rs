//! Helpers for ARIA id references.

use std::sync::atomic::{AtomicU64, Ordering};

/// Prefix used by [`IdGenerator::generate_default`].
pub const DEFAULT_ID_PREFIX: &str = "a11y";

/// Hands out element ids for `aria-describedby` / `aria-labelledby` wiring.
///
/// Ids are unique per generator; use one generator per document.
#[derive(Debug, Default)]
pub struct IdGenerator {
    counter: AtomicU64,
}

impl IdGenerator {
    pub const fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }

    /// Next id of the form `"{prefix}-{n}"`, starting at 1.
    pub fn generate(&self, prefix: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}-{n}")
    }

    pub fn generate_default(&self) -> String {
        self.generate(DEFAULT_ID_PREFIX)
    }
}

/// Space-join the non-empty ids, or `None` when there are none.
pub fn join_id_refs<'a, I>(ids: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let joined = ids
        .into_iter()
        .flatten()
        .filter(|id| !id.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    (!joined.is_empty()).then_some(joined)
}

/// Value for `aria-invalid`: present only when the field has an error.
#[inline]
pub fn aria_invalid(has_error: bool) -> Option<bool> {
    has_error.then_some(true)
}
