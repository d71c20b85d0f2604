//! Transient, per-view UI state.
//!
//! None of these types outlive a page view:
//!
//! - [`Carousel`]: wrapping index over images or floor plans.
//! - [`Section`]: which detail-page content block is shown.
//! - [`ScrollToggle`] / [`ScrollFeed`]: navbar treatment driven by scroll offset.
//! - [`FormDraft`]: text typed into a form, cleared after submission.

pub mod carousel;
pub mod form;
pub mod scroll;
pub mod section;

pub use carousel::{wrap_index, Carousel};
pub use form::{
    FieldSpec, FormDraft, FormKind, InputKind, InquirySink, LogSink, Submission,
    CONTACT_SUBJECTS,
};
pub use scroll::{ScrollFeed, ScrollSubscription, ScrollToggle, DEFAULT_THRESHOLD_PX};
pub use section::{Section, UnknownSection};
