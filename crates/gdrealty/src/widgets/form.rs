//! Form drafts and the local submission sink.
//!
//! Every form on the site is described by a [`FormKind`]: its fields, which
//! of them the browser must require, and the fixed acknowledgment shown
//! after submitting. A [`FormDraft`] holds the text the visitor has typed.
//! Submitting always succeeds locally; the resulting [`Submission`] is
//! handed to an [`InquirySink`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Kind of HTML control used for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Single-line text.
    Text,
    /// Email address.
    Email,
    /// Telephone number.
    Tel,
    /// Multi-line text with the given number of rows.
    TextArea(u8),
    /// Drop-down of `(value, label)` options.
    Select(&'static [(&'static str, &'static str)]),
}

impl InputKind {
    /// The `type` attribute for `<input>` controls.
    #[must_use]
    pub fn html_type(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Tel => "tel",
            Self::Text | Self::TextArea(_) | Self::Select(_) => "text",
        }
    }
}

/// Static description of one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name, used as the form key.
    pub name: &'static str,
    /// Visible label.
    pub label: &'static str,
    /// Control kind.
    pub input: InputKind,
    /// Placeholder text.
    pub placeholder: &'static str,
    /// Whether the browser must require a value.
    pub required: bool,
}

const fn field(
    name: &'static str,
    label: &'static str,
    input: InputKind,
    placeholder: &'static str,
    required: bool,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        input,
        placeholder,
        required,
    }
}

/// Subjects offered on the contact form.
pub const CONTACT_SUBJECTS: &[(&str, &str)] = &[
    ("buying", "Buying a Property"),
    ("selling", "Selling a Property"),
    ("renting", "Renting"),
    ("investment", "Investment Opportunities"),
    ("consultation", "Free Consultation"),
    ("other", "Other"),
];

const CALL_BACK_FIELDS: &[FieldSpec] = &[
    field("name", "Your Name", InputKind::Text, "What should we call you?", true),
    field("phone", "Phone Number", InputKind::Tel, "Your best contact number", true),
];

const CALL_REQUEST_FIELDS: &[FieldSpec] = &[
    field("name", "Your Name", InputKind::Text, "What should we call you?", true),
    field("phone", "Phone Number", InputKind::Tel, "Your best contact number", true),
    field(
        "address",
        "Address (Optional)",
        InputKind::Text,
        "Current address or area of interest",
        false,
    ),
];

const CONTACT_MESSAGE_FIELDS: &[FieldSpec] = &[
    field("name", "Full Name", InputKind::Text, "Your full name", true),
    field("email", "Email Address", InputKind::Email, "your.email@example.com", true),
    field("phone", "Phone Number", InputKind::Tel, "(555) 123-4567", false),
    field(
        "subject",
        "Subject",
        InputKind::Select(CONTACT_SUBJECTS),
        "Select a subject",
        true,
    ),
    field(
        "message",
        "Message",
        InputKind::TextArea(6),
        "Tell us about what you're looking for, any questions you have, or how we can help...",
        true,
    ),
];

const INQUIRY_FIELDS: &[FieldSpec] = &[
    field("name", "Full Name", InputKind::Text, "Your full name", true),
    field("email", "Email Address", InputKind::Email, "your.email@example.com", true),
    field("phone", "Phone Number", InputKind::Tel, "(555) 123-4567", true),
    field(
        "message",
        "Message",
        InputKind::TextArea(4),
        "Tell us about your interest in this property...",
        false,
    ),
];

const NEWSLETTER_FIELDS: &[FieldSpec] = &[field(
    "email",
    "Email Address",
    InputKind::Email,
    "Enter your email",
    true,
)];

/// The forms present on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormKind {
    /// "Let's Call You" on the home page.
    CallBack,
    /// "Let's Call You" on the contact page.
    CallRequest,
    /// "Send Us a Message" on the contact page.
    ContactMessage,
    /// "Request More Information" on a project detail page.
    Inquiry,
    /// "Stay in the Loop" signup on the blog page.
    Newsletter,
}

impl FormKind {
    /// Field layout, in display order.
    #[must_use]
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            Self::CallBack => CALL_BACK_FIELDS,
            Self::CallRequest => CALL_REQUEST_FIELDS,
            Self::ContactMessage => CONTACT_MESSAGE_FIELDS,
            Self::Inquiry => INQUIRY_FIELDS,
            Self::Newsletter => NEWSLETTER_FIELDS,
        }
    }

    /// Fixed message shown after a successful submission.
    #[must_use]
    pub fn acknowledgment(self) -> &'static str {
        match self {
            Self::CallBack => "Thanks! We'll call you soon.",
            Self::CallRequest => "Thanks! We'll call you within 24 hours.",
            Self::ContactMessage => "Message sent! We'll get back to you soon.",
            Self::Inquiry => "Thanks for your interest! We'll be in touch soon.",
            Self::Newsletter => "You're subscribed! Watch your inbox for our next update.",
        }
    }

    /// Submit button label.
    #[must_use]
    pub fn submit_label(self) -> &'static str {
        match self {
            Self::CallBack | Self::CallRequest => "Request Call Back",
            Self::ContactMessage | Self::Inquiry => "Send Message",
            Self::Newsletter => "Subscribe",
        }
    }

    /// Stable identifier used in logs and HTML ids.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::CallBack => "call-back",
            Self::CallRequest => "call-request",
            Self::ContactMessage => "contact-message",
            Self::Inquiry => "inquiry",
            Self::Newsletter => "newsletter",
        }
    }

    /// Look up a field by name.
    #[must_use]
    pub fn field(self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.name == name)
    }
}

impl std::fmt::Display for FormKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// Text the visitor has entered into one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDraft {
    kind: FormKind,
    values: BTreeMap<&'static str, String>,
}

impl FormDraft {
    /// An empty draft.
    #[must_use]
    pub fn new(kind: FormKind) -> Self {
        let values = kind
            .fields()
            .iter()
            .map(|f| (f.name, String::new()))
            .collect();
        Self { kind, values }
    }

    /// Build a draft from submitted key/value pairs. Unknown keys are ignored.
    #[must_use]
    pub fn from_pairs<I, K, V>(kind: FormKind, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut draft = Self::new(kind);
        for (key, value) in pairs {
            draft.set(key.as_ref(), value);
        }
        draft
    }

    /// Which form this draft belongs to.
    #[must_use]
    pub fn kind(&self) -> FormKind {
        self.kind
    }

    /// Update a field. Returns `false` if the form has no such field.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.kind.field(name) {
            Some(spec) => {
                self.values.insert(spec.name, value.into());
                true
            }
            None => false,
        }
    }

    /// Current value of a field; empty for unknown fields.
    #[must_use]
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map_or("", String::as_str)
    }

    /// `true` when every field is empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.values.values().all(String::is_empty)
    }

    /// Required fields that are still empty, in display order.
    ///
    /// Mirrors the browser's native `required` check: only the empty string
    /// fails.
    #[must_use]
    pub fn missing_required(&self) -> Vec<&'static FieldSpec> {
        self.kind
            .fields()
            .iter()
            .filter(|f| f.required && self.get(f.name).is_empty())
            .collect()
    }

    /// Submit the draft.
    ///
    /// Always succeeds. Every field is reset to the empty string and the
    /// captured values are returned.
    pub fn submit(&mut self) -> Submission {
        let fields = self
            .values
            .iter_mut()
            .map(|(name, value)| ((*name).to_string(), std::mem::take(value)))
            .collect();
        debug!(form = %self.kind, "form draft submitted and reset");
        Submission {
            kind: self.kind,
            fields,
            submitted_at: Utc::now(),
        }
    }
}

/// A submitted form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Which form was submitted.
    pub kind: FormKind,
    /// Field values at the time of submission.
    pub fields: BTreeMap<String, String>,
    /// When the visitor submitted.
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    /// The acknowledgment to show the visitor.
    #[must_use]
    pub fn acknowledgment(&self) -> &'static str {
        self.kind.acknowledgment()
    }
}

/// Destination for submitted forms.
///
/// A CRM or messaging integration would implement this. Delivery has no
/// failure path visible to the visitor.
#[async_trait::async_trait]
pub trait InquirySink: Send + Sync + std::fmt::Debug {
    /// Hand off a submission.
    async fn deliver(&self, submission: &Submission);
}

/// Sink that only writes the submission to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

#[async_trait::async_trait]
impl InquirySink for LogSink {
    async fn deliver(&self, submission: &Submission) {
        info!(
            form = %submission.kind,
            fields = ?submission.fields,
            submitted_at = %submission.submitted_at.to_rfc3339(),
            "form submitted"
        );
    }
}
