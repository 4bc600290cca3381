//! Cancelable one-shot task scheduling.
//!
//! The scheduler defers closures to a point in time measured against a
//! [`Clock`]. Every scheduled task is addressed by a [`ScheduledTaskId`];
//! cancelling the id guarantees the closure never runs. Nothing runs on its
//! own: the host event loop calls [`SharedTaskScheduler::process_ready`] when
//! [`SharedTaskScheduler::time_until_next`] says something is due.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use herald_core::{ManualClock, SharedTaskScheduler};
//!
//! let clock = Arc::new(ManualClock::new());
//! let scheduler = SharedTaskScheduler::with_clock(clock.clone());
//!
//! let id = scheduler.schedule_once(Duration::from_millis(100), || println!("later"));
//! assert_eq!(scheduler.process_ready(), 0);
//!
//! clock.advance(Duration::from_millis(100));
//! assert_eq!(scheduler.process_ready(), 1);
//! assert!(!scheduler.is_active(id));
//! ```

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, SchedulerError};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a scheduled task.
    ///
    /// Ids are never reused: once a task runs or is cancelled its id stays
    /// invalid even if the underlying slot is recycled.
    pub struct ScheduledTaskId;
}

/// A boxed task closure.
pub type BoxedScheduledTask = Box<dyn FnOnce() + Send + 'static>;

/// Internal scheduled task data.
struct ScheduledTaskData {
    /// When this task should execute.
    run_at: Instant,
    /// The closure to execute.
    task: BoxedScheduledTask,
}

/// An entry in the scheduler queue (min-heap by execution time, then FIFO).
#[derive(Debug, Clone, Copy)]
struct SchedulerQueueEntry {
    id: ScheduledTaskId,
    run_time: Instant,
    seq: u64,
}

impl PartialEq for SchedulerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.run_time == other.run_time && self.seq == other.seq
    }
}

impl Eq for SchedulerQueueEntry {}

impl PartialOrd for SchedulerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SchedulerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap; equal fire times run in scheduling order.
        other
            .run_time
            .cmp(&self.run_time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Manages one-shot deferred tasks.
///
/// Cancelled tasks are removed from the task table immediately; their queue
/// entries are skipped lazily when they reach the front of the heap.
pub struct TaskScheduler {
    clock: Arc<dyn Clock>,
    tasks: SlotMap<ScheduledTaskId, ScheduledTaskData>,
    queue: BinaryHeap<SchedulerQueueEntry>,
    next_seq: u64,
}

impl TaskScheduler {
    /// Create a scheduler driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a scheduler driven by the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            tasks: SlotMap::with_key(),
            queue: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// The scheduler's notion of "now".
    #[inline]
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Schedule a task to execute after `delay`.
    pub fn schedule_once<F>(&mut self, delay: Duration, task: F) -> ScheduledTaskId
    where
        F: FnOnce() + Send + 'static,
    {
        let run_at = self.now() + delay;
        self.schedule_at(run_at, task)
    }

    /// Schedule a task to execute at a specific instant.
    ///
    /// An instant in the past makes the task due on the next processing cycle.
    pub fn schedule_at<F>(&mut self, instant: Instant, task: F) -> ScheduledTaskId
    where
        F: FnOnce() + Send + 'static,
    {
        let id = self.tasks.insert(ScheduledTaskData {
            run_at: instant,
            task: Box::new(task),
        });
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(SchedulerQueueEntry {
            id,
            run_time: instant,
            seq,
        });

        tracing::trace!(target: targets::SCHEDULER, ?id, "task scheduled");
        id
    }

    /// Cancel a pending task.
    ///
    /// Returns an error if the task is unknown, already cancelled or already ran.
    pub fn cancel(&mut self, id: ScheduledTaskId) -> Result<()> {
        if self.tasks.remove(id).is_some() {
            tracing::trace!(target: targets::SCHEDULER, ?id, "task cancelled");
            Ok(())
        } else {
            Err(SchedulerError::InvalidTaskId.into())
        }
    }

    /// Check if a task is still pending.
    pub fn is_active(&self, id: ScheduledTaskId) -> bool {
        self.tasks.contains_key(id)
    }

    /// Duration until the next pending task is due, if any.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        self.prune_stale();
        let now = self.now();
        self.queue
            .peek()
            .map(|entry| entry.run_time.saturating_duration_since(now))
    }

    /// Check if any task is due now.
    pub fn has_ready(&mut self) -> bool {
        self.prune_stale();
        let now = self.now();
        self.queue.peek().is_some_and(|entry| entry.run_time <= now)
    }

    /// Remove every due task from the scheduler, in execution order.
    ///
    /// The caller is responsible for running the returned closures. This
    /// split lets [`SharedTaskScheduler`] run tasks without holding its lock.
    pub fn take_ready(&mut self) -> Vec<(ScheduledTaskId, BoxedScheduledTask)> {
        let now = self.now();
        let mut ready = Vec::new();

        while let Some(entry) = self.queue.peek() {
            if entry.run_time > now {
                break;
            }
            let Some(entry) = self.queue.pop() else {
                break;
            };

            let Some(data) = self.tasks.remove(entry.id) else {
                // Cancelled.
                continue;
            };
            debug_assert_eq!(data.run_at, entry.run_time);
            ready.push((entry.id, data.task));
        }

        ready
    }

    /// Run every due task.
    ///
    /// Returns the number of tasks that were executed.
    #[tracing::instrument(skip(self), target = "herald_core::scheduler", level = "trace")]
    pub fn process_ready(&mut self) -> usize {
        let ready = self.take_ready();
        let count = ready.len();
        for (id, task) in ready {
            tracing::trace!(target: targets::SCHEDULER, ?id, "executing scheduled task");
            task();
        }
        count
    }

    /// Number of pending tasks.
    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }

    fn prune_stale(&mut self) {
        while let Some(entry) = self.queue.peek() {
            if self.tasks.contains_key(entry.id) {
                break;
            }
            self.queue.pop();
        }
    }
}

impl Default for TaskScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TaskScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskScheduler")
            .field("pending", &self.tasks.len())
            .field("queued", &self.queue.len())
            .finish()
    }
}

/// A thread-safe wrapper around [`TaskScheduler`].
///
/// Due tasks are dequeued under the lock and executed after it is released,
/// so a task may schedule or cancel other tasks on the same scheduler.
#[derive(Debug, Default)]
pub struct SharedTaskScheduler {
    inner: Mutex<TaskScheduler>,
}

impl SharedTaskScheduler {
    /// Create a shared scheduler driven by the system clock.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(TaskScheduler::new()),
        }
    }

    /// Create a shared scheduler driven by the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(TaskScheduler::with_clock(clock)),
        }
    }

    pub fn now(&self) -> Instant {
        self.inner.lock().now()
    }

    pub fn schedule_once<F>(&self, delay: Duration, task: F) -> ScheduledTaskId
    where
        F: FnOnce() + Send + 'static,
    {
        self.inner.lock().schedule_once(delay, task)
    }

    pub fn schedule_at<F>(&self, instant: Instant, task: F) -> ScheduledTaskId
    where
        F: FnOnce() + Send + 'static,
    {
        self.inner.lock().schedule_at(instant, task)
    }

    pub fn cancel(&self, id: ScheduledTaskId) -> Result<()> {
        self.inner.lock().cancel(id)
    }

    pub fn is_active(&self, id: ScheduledTaskId) -> bool {
        self.inner.lock().is_active(id)
    }

    pub fn time_until_next(&self) -> Option<Duration> {
        self.inner.lock().time_until_next()
    }

    pub fn has_ready(&self) -> bool {
        self.inner.lock().has_ready()
    }

    /// Run every due task outside the lock.
    ///
    /// Returns the number of tasks that were executed.
    pub fn process_ready(&self) -> usize {
        let ready = self.inner.lock().take_ready();
        let count = ready.len();
        for (id, task) in ready {
            tracing::trace!(target: targets::SCHEDULER, ?id, "executing scheduled task");
            task();
        }
        count
    }

    pub fn active_count(&self) -> usize {
        self.inner.lock().active_count()
    }
}

static_assertions::assert_impl_all!(SharedTaskScheduler: Send, Sync);

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::clock::ManualClock;
    use crate::error::CoreError;

    fn manual() -> (Arc<ManualClock>, TaskScheduler) {
        let clock = Arc::new(ManualClock::new());
        let scheduler = TaskScheduler::with_clock(clock.clone());
        (clock, scheduler)
    }

    #[test]
    fn test_schedule_once() {
        let (clock, mut scheduler) = manual();
        let executed = Arc::new(AtomicUsize::new(0));
        let executed_clone = executed.clone();

        let id = scheduler.schedule_once(Duration::from_millis(10), move || {
            executed_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(scheduler.is_active(id));
        assert_eq!(scheduler.active_count(), 1);

        // Not due yet
        assert_eq!(scheduler.process_ready(), 0);
        assert_eq!(executed.load(Ordering::SeqCst), 0);

        clock.advance(Duration::from_millis(10));
        assert_eq!(scheduler.process_ready(), 1);
        assert_eq!(executed.load(Ordering::SeqCst), 1);

        // One-shot tasks are gone after running
        assert!(!scheduler.is_active(id));
        assert_eq!(scheduler.active_count(), 0);
        assert_eq!(scheduler.process_ready(), 0);
    }

    #[test]
    fn test_cancel_prevents_execution() {
        let (clock, mut scheduler) = manual();
        let executed = Arc::new(AtomicUsize::new(0));
        let executed_clone = executed.clone();

        let id = scheduler.schedule_once(Duration::from_millis(5), move || {
            executed_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(scheduler.cancel(id).is_ok());
        assert!(!scheduler.is_active(id));

        clock.advance(Duration::from_millis(50));
        assert_eq!(scheduler.process_ready(), 0);
        assert_eq!(executed.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_cancel_twice_is_an_error() {
        let (_clock, mut scheduler) = manual();
        let id = scheduler.schedule_once(Duration::from_millis(5), || {});

        assert!(scheduler.cancel(id).is_ok());
        assert_eq!(
            scheduler.cancel(id),
            Err(CoreError::Scheduler(SchedulerError::InvalidTaskId))
        );
    }

    #[test]
    fn test_cancel_after_run_is_an_error() {
        let (clock, mut scheduler) = manual();
        let id = scheduler.schedule_once(Duration::ZERO, || {});

        clock.advance(Duration::from_millis(1));
        assert_eq!(scheduler.process_ready(), 1);
        assert!(scheduler.cancel(id).is_err());
    }

    #[test]
    fn test_recycled_slot_keeps_old_id_invalid() {
        let (_clock, mut scheduler) = manual();
        let old = scheduler.schedule_once(Duration::from_millis(5), || {});
        scheduler.cancel(old).unwrap();

        let new = scheduler.schedule_once(Duration::from_millis(5), || {});
        assert_ne!(old, new);
        assert!(!scheduler.is_active(old));
        assert!(scheduler.is_active(new));
    }

    #[test]
    fn test_execution_order_by_time_then_fifo() {
        let (clock, mut scheduler) = manual();
        let log = Arc::new(Mutex::new(Vec::new()));

        for (delay, label) in [(30, "c"), (10, "a"), (10, "b"), (20, "x")] {
            let log = log.clone();
            scheduler.schedule_once(Duration::from_millis(delay), move || {
                log.lock().push(label);
            });
        }

        clock.advance(Duration::from_millis(100));
        assert_eq!(scheduler.process_ready(), 4);
        assert_eq!(*log.lock(), vec!["a", "b", "x", "c"]);
    }

    #[test]
    fn test_time_until_next_skips_cancelled() {
        let (clock, mut scheduler) = manual();
        let early = scheduler.schedule_once(Duration::from_millis(10), || {});
        scheduler.schedule_once(Duration::from_millis(40), || {});

        assert_eq!(scheduler.time_until_next(), Some(Duration::from_millis(10)));
        scheduler.cancel(early).unwrap();
        assert_eq!(scheduler.time_until_next(), Some(Duration::from_millis(40)));

        clock.advance(Duration::from_millis(45));
        assert_eq!(scheduler.time_until_next(), Some(Duration::ZERO));
        assert!(scheduler.has_ready());
    }

    #[test]
    fn test_empty_scheduler() {
        let (_clock, mut scheduler) = manual();
        assert_eq!(scheduler.time_until_next(), None);
        assert!(!scheduler.has_ready());
        assert_eq!(scheduler.process_ready(), 0);
    }

    #[test]
    fn test_shared_scheduler_task_can_reschedule() {
        let clock = Arc::new(ManualClock::new());
        let scheduler = Arc::new(SharedTaskScheduler::with_clock(clock.clone()));
        let executed = Arc::new(AtomicUsize::new(0));

        let inner_scheduler = scheduler.clone();
        let inner_executed = executed.clone();
        scheduler.schedule_once(Duration::from_millis(10), move || {
            // Would deadlock if the lock were held while running tasks.
            let executed = inner_executed.clone();
            inner_scheduler.schedule_once(Duration::from_millis(10), move || {
                executed.fetch_add(1, Ordering::SeqCst);
            });
        });

        clock.advance(Duration::from_millis(10));
        assert_eq!(scheduler.process_ready(), 1);
        assert_eq!(scheduler.active_count(), 1);

        clock.advance(Duration::from_millis(10));
        assert_eq!(scheduler.process_ready(), 1);
        assert_eq!(executed.load(Ordering::SeqCst), 1);
    }
}
