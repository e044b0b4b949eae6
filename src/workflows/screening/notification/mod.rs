//! Bulk candidate notification with per-recipient failure isolation.

mod dispatcher;
mod templates;

pub use dispatcher::{
    DeliveryOutcome, LoggingTransport, MessageTransport, NotificationDispatcher, RetryPolicy,
    TransportError,
};
pub use templates::{
    InterviewTemplate, MessageTemplate, RejectedTemplate, RenderedMessage, SelectedTemplate,
    TemplateError, TemplateKind,
};

pub(crate) use templates::highlight_reasons;
