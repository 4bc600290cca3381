//! Herald - accessible announcements and focus management.
//!
//! Herald is the accessibility layer of a web front end, expressed without a
//! browser: it decides what screen readers hear and where keyboard focus
//! goes, and leaves rendering to the host.
//!
//! - [`live_region`]: a root [`LiveRegionProvider`] owning a polite and an
//!   assertive live region, and [`Announcer`] handles to speak through them
//! - [`focus`]: Tab/Shift+Tab trapping inside a container and focus return
//!   when a surface closes, over an injected [`FocusHost`]
//! - [`feedback`], [`forms`], [`dialog`]: the error messages, search box,
//!   contact form and modal surfaces built on top
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use herald::{FormErrorSummary, LiveRegionProvider};
//! use herald_core::ManualClock;
//!
//! let clock = Arc::new(ManualClock::new());
//! let provider = LiveRegionProvider::with_clock(clock.clone());
//!
//! let mut summary = FormErrorSummary::new(provider.announcer());
//! summary.update(["Please enter a valid email address", "Message is required"]);
//!
//! clock.advance(Duration::from_millis(100));
//! provider.process_pending();
//! assert_eq!(
//!     provider.assertive_message(),
//!     "Form has 2 errors. Please correct the following errors:"
//! );
//! ```

pub mod config;
pub mod dialog;
mod error;
pub mod feedback;
pub mod focus;
pub mod forms;
pub mod ids;
pub mod keyboard;
pub mod live_region;

pub use config::{AnnouncerConfig, HeraldConfig};
pub use dialog::{ModalSurface, SurfaceKeyAction};
pub use error::{Error, Result};
pub use feedback::{FieldErrorAnnouncer, FormErrorSummary, SearchAnnouncements};
pub use focus::{ElementId, ElementKind, ElementTree, FocusHost, FocusReturn, FocusTrap, TrapAction};
pub use forms::{
    ContactField, ContactForm, ContactSubmission, FieldErrors, SubmissionError, SubmissionSink,
    SubmitOutcome,
};
pub use ids::{IdGenerator, aria_invalid, join_id_refs};
pub use keyboard::{Key, KeyPressEvent, KeyboardModifiers, handle_enter_key, handle_escape_key};
pub use live_region::{Announcer, LiveRegion, LiveRegionProvider, Politeness};
