//! Widget messages: notifications widgets emit for the embedding application.

use crate::widget::WidgetKey;

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    /// The widget's node gained focus.
    Focus,
    /// The widget's node lost focus.
    Blur,
    /// The user confirmed the widget's value (Enter in a text input).
    Submit,
    /// A widget-defined notification.
    Custom(String),
}

/// A message from one widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// The widget that emitted the message.
    pub sender: WidgetKey,
    /// Id of the sender at emission time.
    pub sender_id: String,
    /// The payload.
    pub kind: MessageKind,
}

impl Message {
    /// Create a new message.
    pub fn new(sender: WidgetKey, sender_id: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            sender,
            sender_id: sender_id.into(),
            kind,
        }
    }

    /// Human-readable name for this message kind.
    pub fn name(&self) -> &str {
        match &self.kind {
            MessageKind::Focus => "Focus",
            MessageKind::Blur => "Blur",
            MessageKind::Submit => "Submit",
            MessageKind::Custom(name) => name,
        }
    }
}
