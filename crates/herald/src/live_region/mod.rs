//! Live-region announcements for assistive technology.
//!
//! A [`LiveRegionProvider`] is created once at the root of the UI tree. It
//! owns two always-present, visually hidden [`LiveRegion`]s, one per
//! [`Politeness`] level, and hands out [`Announcer`] handles to anything that
//! needs to speak.
//!
//! # Announcement lifecycle
//!
//! Screen readers only speak when a live region's text *changes*. Each
//! `announce` therefore:
//!
//! 1. clears the target region immediately,
//! 2. sets the new text after `set_delay` (100 ms by default),
//! 3. clears it again `clear_after` (3 s by default) after the call.
//!
//! A later `announce` on the same region cancels the earlier call's pending
//! steps, so a stale clear can never blank a newer message.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use herald::live_region::{LiveRegionProvider, Politeness};
//! use herald_core::ManualClock;
//!
//! let clock = Arc::new(ManualClock::new());
//! let provider = LiveRegionProvider::with_clock(clock.clone());
//! let announcer = provider.announcer();
//!
//! announcer.announce("Search cleared", Politeness::Polite);
//! assert_eq!(provider.polite_message(), "");
//!
//! clock.advance(Duration::from_millis(100));
//! provider.process_pending();
//! assert_eq!(provider.polite_message(), "Search cleared");
//! ```

mod announcer;
mod provider;
mod region;

pub use announcer::Announcer;
pub use provider::LiveRegionProvider;
pub use region::{LiveRegion, LiveRegionAttributes};

use serde::{Deserialize, Serialize};

/// Urgency of an announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Politeness {
    /// Waits for current speech to finish. Used for status updates.
    #[default]
    Polite,
    /// Interrupts current speech. Used for errors.
    Assertive,
}

impl Politeness {
    /// Both levels, in slot order.
    pub const ALL: [Politeness; 2] = [Politeness::Polite, Politeness::Assertive];

    /// Value of the `aria-live` attribute.
    pub fn aria_live(self) -> &'static str {
        match self {
            Politeness::Polite => "polite",
            Politeness::Assertive => "assertive",
        }
    }

    /// ARIA role of the region that carries this level.
    pub fn role(self) -> &'static str {
        match self {
            Politeness::Polite => "status",
            Politeness::Assertive => "alert",
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Politeness::Polite => 0,
            Politeness::Assertive => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_polite() {
        assert_eq!(Politeness::default(), Politeness::Polite);
    }

    #[test]
    fn test_aria_mapping() {
        assert_eq!(Politeness::Polite.role(), "status");
        assert_eq!(Politeness::Polite.aria_live(), "polite");
        assert_eq!(Politeness::Assertive.role(), "alert");
        assert_eq!(Politeness::Assertive.aria_live(), "assertive");
    }

    #[test]
    fn test_slot_indices_are_distinct() {
        assert_ne!(Politeness::Polite.index(), Politeness::Assertive.index());
        for level in Politeness::ALL {
            assert_eq!(Politeness::ALL[level.index()], level);
        }
    }
}
