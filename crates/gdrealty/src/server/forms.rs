//! Form posts.
//!
//! Each form posts back to the page that shows it. A complete draft is
//! submitted to the configured sink and the page is rendered again with an
//! empty form and the acknowledgment. A draft with empty required fields is
//! rendered back with its values and nothing is submitted.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::response::Response;
use axum::Form;
use tracing::debug;

use super::pages;
use super::AppState;
use crate::error::Result;
use crate::routes::DetailQuery;
use crate::widgets::{FieldSpec, FormDraft, FormKind, InputKind};

/// Message shown next to an empty required field.
pub const REQUIRED_MESSAGE: &str = "Please fill out this field";

/// A form as it should be rendered: its draft, any fields that blocked
/// submission, and the acknowledgment of a submission that just went
/// through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    draft: FormDraft,
    missing: Vec<&'static str>,
    notice: Option<&'static str>,
}

impl FormState {
    /// An empty form.
    #[must_use]
    pub fn fresh(kind: FormKind) -> Self {
        Self {
            draft: FormDraft::new(kind),
            missing: Vec::new(),
            notice: None,
        }
    }

    /// Whether a submission was accepted.
    #[must_use]
    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    /// Names of required fields that were left empty.
    #[must_use]
    pub fn missing(&self) -> &[&'static str] {
        &self.missing
    }

    /// Render model for this form, posting to `action`.
    #[must_use]
    pub fn view(&self, action: impl Into<String>) -> FormView {
        let kind = self.draft.kind();
        FormView {
            slug: kind.slug(),
            action: action.into(),
            submit_label: kind.submit_label(),
            fields: kind
                .fields()
                .iter()
                .map(|spec| self.field_view(kind, spec))
                .collect(),
            notice: self.notice(),
            incomplete: !self.missing.is_empty(),
            required_message: REQUIRED_MESSAGE,
        }
    }

    fn field_view(&self, kind: FormKind, spec: &FieldSpec) -> FieldView {
        let value = self.draft.get(spec.name).to_string();
        let (control, rows, options) = match spec.input {
            InputKind::TextArea(rows) => ("textarea", rows, Vec::new()),
            InputKind::Select(choices) => (
                "select",
                0,
                choices
                    .iter()
                    .map(|&(choice, label)| OptionView {
                        value: choice,
                        label,
                        selected: choice == value,
                    })
                    .collect(),
            ),
            InputKind::Text | InputKind::Email | InputKind::Tel => ("input", 0, Vec::new()),
        };

        FieldView {
            id: format!("{}-{}", kind.slug(), spec.name),
            name: spec.name,
            label: spec.label,
            control,
            html_type: spec.input.html_type(),
            rows,
            placeholder: spec.placeholder,
            required: spec.required,
            missing: self.missing.contains(&spec.name),
            value,
            options,
        }
    }
}

/// Validate and submit a posted form.
pub async fn process(state: &AppState, kind: FormKind, pairs: HashMap<String, String>) -> FormState {
    let mut draft = FormDraft::from_pairs(kind, pairs);
    let missing: Vec<&'static str> = draft.missing_required().iter().map(|f| f.name).collect();

    if !missing.is_empty() {
        debug!(form = %kind, ?missing, "form posted with empty required fields");
        return FormState {
            draft,
            missing,
            notice: None,
        };
    }

    let submission = draft.submit();
    state.sink.deliver(&submission).await;
    FormState {
        draft,
        missing,
        notice: Some(submission.acknowledgment()),
    }
}

/// Render model of a form.
#[derive(Debug, Clone)]
pub struct FormView {
    /// Form slug, used for element ids.
    pub slug: &'static str,
    /// Post target.
    pub action: String,
    /// Submit button text.
    pub submit_label: &'static str,
    /// Fields in display order.
    pub fields: Vec<FieldView>,
    /// Acknowledgment of an accepted submission.
    pub notice: Option<&'static str>,
    /// Whether the last post was rejected for empty required fields.
    pub incomplete: bool,
    /// Message shown next to fields that blocked the last post.
    pub required_message: &'static str,
}

/// Render model of a form field.
#[derive(Debug, Clone)]
pub struct FieldView {
    /// Element id.
    pub id: String,
    /// Form key.
    pub name: &'static str,
    /// Visible label.
    pub label: &'static str,
    /// `input`, `textarea` or `select`.
    pub control: &'static str,
    /// `type` attribute for inputs.
    pub html_type: &'static str,
    /// Rows for text areas.
    pub rows: u8,
    /// Placeholder, or the empty option's label for selects.
    pub placeholder: &'static str,
    /// Whether the browser must require a value.
    pub required: bool,
    /// Whether the field blocked the last submission.
    pub missing: bool,
    /// Current value.
    pub value: String,
    /// Options for selects.
    pub options: Vec<OptionView>,
}

/// One `<option>` of a select.
#[derive(Debug, Clone)]
pub struct OptionView {
    /// Submitted value.
    pub value: &'static str,
    /// Visible label.
    pub label: &'static str,
    /// Whether it is the current value.
    pub selected: bool,
}

/// `POST /`: the home page call-back form.
pub async fn call_back(
    State(state): State<AppState>,
    Form(pairs): Form<HashMap<String, String>>,
) -> Result<Response> {
    let form = process(&state, FormKind::CallBack, pairs).await;
    pages::render_home(&state, &HashMap::new(), form).await
}

/// `POST /contact/call`
pub async fn call_request(
    State(state): State<AppState>,
    Form(pairs): Form<HashMap<String, String>>,
) -> Result<Response> {
    let call = process(&state, FormKind::CallRequest, pairs).await;
    pages::render_contact(&state, call, FormState::fresh(FormKind::ContactMessage))
}

/// `POST /contact/message`
pub async fn contact_message(
    State(state): State<AppState>,
    Form(pairs): Form<HashMap<String, String>>,
) -> Result<Response> {
    let message = process(&state, FormKind::ContactMessage, pairs).await;
    pages::render_contact(&state, FormState::fresh(FormKind::CallRequest), message)
}

/// `POST /blog`: the newsletter signup.
pub async fn newsletter(
    State(state): State<AppState>,
    Form(pairs): Form<HashMap<String, String>>,
) -> Result<Response> {
    let form = process(&state, FormKind::Newsletter, pairs).await;
    pages::render_blog(&state, "", form).await
}

/// `POST /projects/{id}/inquiry`: the detail page inquiry form.
pub async fn inquiry(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(pairs): Form<HashMap<String, String>>,
) -> Result<Response> {
    let form = process(&state, FormKind::Inquiry, pairs).await;
    pages::render_detail(&state, Some(&raw_id), &DetailQuery::default(), form).await
}
