//! The root-level owner of both live regions.

use std::fmt;
use std::sync::{Arc, Weak};

use herald_core::logging::{span_names, targets};
use herald_core::{Clock, PerfSpan, ScheduledTaskId, SharedTaskScheduler};
use parking_lot::Mutex;

use super::{Announcer, LiveRegion, Politeness};
use crate::config::AnnouncerConfig;
use crate::error::Result;

/// Scheduler bookkeeping for one region.
#[derive(Debug, Default)]
struct PendingAnnouncement {
    /// Bumped on every `announce`; tasks carry the value they were made with.
    generation: u64,
    set_task: Option<ScheduledTaskId>,
    clear_task: Option<ScheduledTaskId>,
}

impl PendingAnnouncement {
    fn task_count(&self) -> usize {
        usize::from(self.set_task.is_some()) + usize::from(self.clear_task.is_some())
    }
}

#[derive(Debug)]
struct Channel {
    region: LiveRegion,
    pending: Mutex<PendingAnnouncement>,
}

impl Channel {
    fn new(politeness: Politeness) -> Self {
        Self {
            region: LiveRegion::new(politeness),
            pending: Mutex::new(PendingAnnouncement::default()),
        }
    }
}

/// The scheduled step of an announcement.
#[derive(Debug, Clone, Copy)]
enum Step {
    Set,
    Clear,
}

/// Shared state behind a provider. Announcers and scheduled tasks only hold
/// weak references to it, so dropping the provider silences them.
pub(crate) struct ProviderInner {
    scheduler: Arc<SharedTaskScheduler>,
    config: AnnouncerConfig,
    channels: [Channel; 2],
}

impl ProviderInner {
    fn channel(&self, priority: Politeness) -> &Channel {
        &self.channels[priority.index()]
    }

    pub(crate) fn announce(self: &Arc<Self>, message: String, priority: Politeness) {
        if message.trim().is_empty() {
            tracing::debug!(
                target: targets::LIVE_REGION,
                priority = priority.aria_live(),
                "ignoring empty announcement"
            );
            return;
        }
        let _span = PerfSpan::new(span_names::ANNOUNCE);

        let channel = self.channel(priority);
        let cleared = {
            let mut pending = channel.pending.lock();
            self.cancel_tasks(&mut pending);
            pending.generation += 1;
            let generation = pending.generation;

            tracing::debug!(
                target: targets::LIVE_REGION,
                priority = priority.aria_live(),
                generation,
                message = %message,
                "announce"
            );

            pending.set_task = Some(self.schedule(
                priority,
                generation,
                Step::Set,
                Some(message),
            ));
            pending.clear_task = Some(self.schedule(priority, generation, Step::Clear, None));
            channel.region.store(String::new())
        };

        // Slots reacting to this change may announce again, so no lock here.
        if let Some(text) = cleared {
            channel.region.publish(text);
        }
    }

    fn schedule(
        self: &Arc<Self>,
        priority: Politeness,
        generation: u64,
        step: Step,
        text: Option<String>,
    ) -> ScheduledTaskId {
        let delay = match step {
            Step::Set => self.config.set_delay(),
            Step::Clear => self.config.clear_after(),
        };
        let weak: Weak<Self> = Arc::downgrade(self);
        self.scheduler.schedule_once(delay, move || {
            if let Some(inner) = weak.upgrade() {
                inner.apply(priority, generation, step, text.unwrap_or_default());
            }
        })
    }

    fn apply(&self, priority: Politeness, generation: u64, step: Step, text: String) {
        let channel = self.channel(priority);
        let changed = {
            let mut pending = channel.pending.lock();
            if pending.generation != generation {
                tracing::trace!(
                    target: targets::LIVE_REGION,
                    ?step,
                    stale = generation,
                    current = pending.generation,
                    "superseded announcement step dropped"
                );
                return;
            }
            match step {
                Step::Set => pending.set_task = None,
                Step::Clear => pending.clear_task = None,
            }
            channel.region.store(text)
        };
        // Slots may announce again, which takes `pending`.
        if let Some(text) = changed {
            channel.region.publish(text);
        }
    }

    fn cancel_tasks(&self, pending: &mut PendingAnnouncement) {
        for id in [pending.set_task.take(), pending.clear_task.take()]
            .into_iter()
            .flatten()
        {
            // An error only means the task already ran.
            let _ = self.scheduler.cancel(id);
        }
    }

    fn cancel_all(&self) {
        for channel in &self.channels {
            let mut pending = channel.pending.lock();
            self.cancel_tasks(&mut pending);
            pending.generation += 1;
        }
    }
}

/// Owner of the polite and assertive live regions.
///
/// Create exactly one at the root of the UI tree, before anything announces,
/// and pass [`Announcer`] handles down to consumers. Dropping the provider
/// cancels every pending announcement step; announcers that outlive it
/// become no-ops.
pub struct LiveRegionProvider {
    inner: Arc<ProviderInner>,
}

impl LiveRegionProvider {
    /// Create a provider that schedules on `scheduler`.
    ///
    /// Fails if `config` would not clear a message after setting it.
    pub fn new(scheduler: Arc<SharedTaskScheduler>, config: AnnouncerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(scheduler, config))
    }

    fn from_parts(scheduler: Arc<SharedTaskScheduler>, config: AnnouncerConfig) -> Self {
        Self {
            inner: Arc::new(ProviderInner {
                scheduler,
                config,
                channels: [
                    Channel::new(Politeness::Polite),
                    Channel::new(Politeness::Assertive),
                ],
            }),
        }
    }

    /// Create a provider with default timing and its own scheduler on `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::from_parts(
            Arc::new(SharedTaskScheduler::with_clock(clock)),
            AnnouncerConfig::default(),
        )
    }

    /// A handle for announcing into this provider's regions.
    pub fn announcer(&self) -> Announcer {
        Announcer::connected(Arc::downgrade(&self.inner))
    }

    /// Announce directly through the provider.
    pub fn announce(&self, message: impl Into<String>, priority: Politeness) {
        self.inner.announce(message.into(), priority);
    }

    pub fn region(&self, priority: Politeness) -> &LiveRegion {
        &self.inner.channel(priority).region
    }

    pub fn polite_message(&self) -> String {
        self.region(Politeness::Polite).content()
    }

    pub fn assertive_message(&self) -> String {
        self.region(Politeness::Assertive).content()
    }

    pub fn config(&self) -> &AnnouncerConfig {
        &self.inner.config
    }

    pub fn scheduler(&self) -> &Arc<SharedTaskScheduler> {
        &self.inner.scheduler
    }

    /// Number of set/clear steps still waiting for `priority`.
    pub fn pending_count(&self, priority: Politeness) -> usize {
        self.inner.channel(priority).pending.lock().task_count()
    }

    /// Run every due scheduler task. Returns how many ran.
    pub fn process_pending(&self) -> usize {
        self.inner.scheduler.process_ready()
    }
}

impl Default for LiveRegionProvider {
    fn default() -> Self {
        Self::from_parts(
            Arc::new(SharedTaskScheduler::new()),
            AnnouncerConfig::default(),
        )
    }
}

impl Drop for LiveRegionProvider {
    fn drop(&mut self) {
        tracing::trace!(target: targets::LIVE_REGION, "provider unmounted");
        self.inner.cancel_all();
    }
}

impl fmt::Debug for LiveRegionProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveRegionProvider")
            .field("polite", &self.polite_message())
            .field("assertive", &self.assertive_message())
            .field("config", &self.inner.config)
            .finish()
    }
}

static_assertions::assert_impl_all!(LiveRegionProvider: Send, Sync);
