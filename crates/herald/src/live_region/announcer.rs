//! Handles consumers use to speak through the live regions.

use std::fmt;
use std::sync::Weak;

use herald_core::logging::targets;

use super::provider::ProviderInner;
use super::{LiveRegionProvider, Politeness};

/// A cheap, cloneable handle to a [`LiveRegionProvider`].
///
/// Announcers never keep the provider alive. Once the provider is dropped,
/// or when the handle was created without one, every call is a silent no-op.
#[derive(Clone, Default)]
pub struct Announcer {
    inner: Weak<ProviderInner>,
}

impl Announcer {
    pub(crate) fn connected(inner: Weak<ProviderInner>) -> Self {
        Self { inner }
    }

    /// A handle that is not attached to any provider.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Resolve an announcer from an optional provider.
    ///
    /// A missing provider is a wiring mistake in the host, so it is logged,
    /// but the returned handle is still usable and simply does nothing.
    pub fn from_context(provider: Option<&LiveRegionProvider>) -> Self {
        match provider {
            Some(provider) => provider.announcer(),
            None => {
                tracing::warn!(
                    target: targets::LIVE_REGION,
                    "no LiveRegionProvider available; announcements will be dropped"
                );
                Self::detached()
            }
        }
    }

    /// Whether the provider behind this handle still exists.
    pub fn is_connected(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Announce `message` at the given urgency.
    pub fn announce(&self, message: impl Into<String>, priority: Politeness) {
        match self.inner.upgrade() {
            Some(inner) => inner.announce(message.into(), priority),
            None => tracing::trace!(
                target: targets::LIVE_REGION,
                priority = priority.aria_live(),
                "announcer detached, message dropped"
            ),
        }
    }

    #[inline]
    pub fn announce_polite(&self, message: impl Into<String>) {
        self.announce(message, Politeness::Polite);
    }

    #[inline]
    pub fn announce_assertive(&self, message: impl Into<String>) {
        self.announce(message, Politeness::Assertive);
    }
}

impl fmt::Debug for Announcer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Announcer")
            .field("connected", &self.is_connected())
            .finish()
    }
}

static_assertions::assert_impl_all!(Announcer: Send, Sync, Clone);
