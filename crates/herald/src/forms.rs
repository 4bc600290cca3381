//! The contact form: validation, accessible error wiring and submission.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use herald_core::logging::targets;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::feedback::{FieldErrorAnnouncer, FormErrorSummary};
use crate::ids::{IdGenerator, aria_invalid, join_id_refs};
use crate::live_region::Announcer;

/// Minimum trimmed length of the message body.
pub const MIN_MESSAGE_LEN: usize = 10;

/// Announced politely after a successful submission.
pub const SENT_MESSAGE: &str = "Message sent successfully. Our team will respond within 24 hours.";

/// Announced assertively when the submission sink fails.
pub const FAILED_MESSAGE: &str = "Failed to send message. Please try again.";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Fields of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 4] = [
        ContactField::Name,
        ContactField::Email,
        ContactField::Subject,
        ContactField::Message,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Subject => "subject",
            ContactField::Message => "message",
        }
    }

    /// Whether the field must be filled in.
    pub fn is_required(self) -> bool {
        !matches!(self, ContactField::Subject)
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The values sent to the submission sink.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    fn get_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Subject => &mut self.subject,
            ContactField::Message => &mut self.message,
        }
    }
}

/// Validation messages by field. Fields without an error are absent.
pub type FieldErrors = BTreeMap<ContactField, String>;

/// Validate a submission.
pub fn validate_contact(data: &ContactSubmission) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if data.name.trim().is_empty() {
        errors.insert(ContactField::Name, "Name is required".into());
    }

    if data.email.trim().is_empty() {
        errors.insert(ContactField::Email, "Email is required".into());
    } else if !EMAIL_RE.is_match(&data.email) {
        errors.insert(
            ContactField::Email,
            "Please enter a valid email address".into(),
        );
    }

    // Length is in UTF-16 code units, as the browser measures it.
    let message = data.message.trim();
    if message.is_empty() {
        errors.insert(ContactField::Message, "Message is required".into());
    } else if message.encode_utf16().count() < MIN_MESSAGE_LEN {
        errors.insert(
            ContactField::Message,
            format!("Message must be at least {MIN_MESSAGE_LEN} characters long"),
        );
    }

    errors
}

/// A failed delivery of a contact submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Submission failed: {message}")]
pub struct SubmissionError {
    message: String,
}

impl SubmissionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Where validated submissions are delivered.
pub trait SubmissionSink {
    fn submit(&mut self, submission: &ContactSubmission) -> Result<(), SubmissionError>;
}

impl<F> SubmissionSink for F
where
    F: FnMut(&ContactSubmission) -> Result<(), SubmissionError>,
{
    fn submit(&mut self, submission: &ContactSubmission) -> Result<(), SubmissionError> {
        self(submission)
    }
}

/// Result of [`ContactForm::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed with this many errors; nothing was sent.
    Invalid { errors: usize },
    /// The sink accepted the submission and the form was reset.
    Sent,
    /// The sink rejected the submission; the values are kept.
    Failed(SubmissionError),
}

#[derive(Debug, Clone)]
struct FieldIds {
    input: String,
    error: String,
}

/// State of the contact form.
///
/// Field-level error announcements are switched off; on a failed submit the
/// form speaks once through its [`FormErrorSummary`] instead of once per
/// field.
pub struct ContactForm<S> {
    data: ContactSubmission,
    errors: FieldErrors,
    ids: BTreeMap<ContactField, FieldIds>,
    field_announcers: BTreeMap<ContactField, FieldErrorAnnouncer>,
    summary: FormErrorSummary,
    announcer: Announcer,
    sink: S,
}

impl<S: SubmissionSink> ContactForm<S> {
    pub fn new(announcer: Announcer, sink: S, id_generator: &IdGenerator) -> Self {
        let ids = ContactField::ALL
            .into_iter()
            .map(|field| {
                let ids = FieldIds {
                    input: id_generator.generate(&format!("contact-{field}")),
                    error: id_generator.generate(&format!("contact-{field}-error")),
                };
                (field, ids)
            })
            .collect();
        let field_announcers = ContactField::ALL
            .into_iter()
            .map(|field| {
                (
                    field,
                    FieldErrorAnnouncer::new(announcer.clone()).with_enabled(false),
                )
            })
            .collect();

        Self {
            data: ContactSubmission::default(),
            errors: FieldErrors::new(),
            ids,
            field_announcers,
            summary: FormErrorSummary::new(announcer.clone()),
            announcer,
            sink,
        }
    }

    pub fn values(&self) -> &ContactSubmission {
        &self.data
    }

    pub fn value(&self, field: ContactField) -> &str {
        self.data.get(field)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: ContactField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Edit a field. Editing clears that field's error.
    pub fn set_field(&mut self, field: ContactField, value: impl Into<String>) {
        *self.data.get_mut(field) = value.into();
        if self.errors.remove(&field).is_some() {
            self.refresh_feedback();
        }
    }

    /// `id` of the field's input element.
    pub fn input_id(&self, field: ContactField) -> &str {
        self.ids.get(&field).map_or("", |ids| ids.input.as_str())
    }

    /// `id` of the element showing the field's error.
    pub fn error_id(&self, field: ContactField) -> &str {
        self.ids.get(&field).map_or("", |ids| ids.error.as_str())
    }

    pub fn aria_invalid(&self, field: ContactField) -> Option<bool> {
        aria_invalid(self.errors.contains_key(&field))
    }

    /// `aria-describedby` for the field: its error element while it has one.
    pub fn aria_describedby(&self, field: ContactField) -> Option<String> {
        let error_id = self.errors.contains_key(&field).then(|| self.error_id(field));
        join_id_refs([error_id])
    }

    /// Validate and, when valid, deliver the form.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.errors = validate_contact(&self.data);
        self.refresh_feedback();
        if !self.errors.is_empty() {
            tracing::debug!(
                target: targets::FEEDBACK,
                errors = self.errors.len(),
                "contact form invalid"
            );
            return SubmitOutcome::Invalid {
                errors: self.errors.len(),
            };
        }

        match self.sink.submit(&self.data) {
            Ok(()) => {
                tracing::info!(target: targets::FEEDBACK, "contact form sent");
                self.announcer.announce_polite(SENT_MESSAGE);
                self.reset();
                SubmitOutcome::Sent
            }
            Err(error) => {
                tracing::error!(target: targets::FEEDBACK, %error, "contact form submission failed");
                self.announcer.announce_assertive(FAILED_MESSAGE);
                SubmitOutcome::Failed(error)
            }
        }
    }

    /// Clear all values and errors.
    pub fn reset(&mut self) {
        self.data = ContactSubmission::default();
        self.errors.clear();
        self.refresh_feedback();
    }

    fn refresh_feedback(&mut self) {
        for (field, announcer) in &mut self.field_announcers {
            announcer.update(self.errors.get(field).map(String::as_str));
        }
        self.summary.update(self.errors.values());
    }
}

impl<S> fmt::Debug for ContactForm<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactForm")
            .field("data", &self.data)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}
