//! Core systems for Herald.
//!
//! This crate provides the runtime pieces the accessibility layer in the
//! `herald` crate is built on:
//!
//! - **Clocks**: [`SystemClock`] for production, [`ManualClock`] for
//!   deterministic tests and headless hosts
//! - **Scheduler**: cancelable one-shot delayed tasks
//! - **Signal/Slot System**: change notification for observers
//! - **Logging**: `tracing` targets and helpers
//!
//! # Scheduler Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use herald_core::{ManualClock, SharedTaskScheduler};
//!
//! let clock = Arc::new(ManualClock::new());
//! let scheduler = SharedTaskScheduler::with_clock(clock.clone());
//!
//! let stale = scheduler.schedule_once(Duration::from_secs(3), || unreachable!());
//! scheduler.cancel(stale).unwrap();
//!
//! clock.advance(Duration::from_secs(5));
//! assert_eq!(scheduler.process_ready(), 0);
//! ```

pub mod clock;
mod error;
pub mod logging;
pub mod scheduler;
pub mod signal;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, Result, SchedulerError, SignalError};
pub use logging::PerfSpan;
pub use scheduler::{ScheduledTaskId, SharedTaskScheduler, TaskScheduler};
pub use signal::{ConnectionId, Signal};
