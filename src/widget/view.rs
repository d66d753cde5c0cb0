//! Render seam between the controller and whatever draws the widget.

use crate::widget::transcript::Message;

/// Receiver for widget render events.
///
/// This is the controller's only outward surface: a rendering implementation
/// maps these callbacks onto its own widgets (and scrolls its message area
/// to the bottom on append); tests record them instead.
pub trait WidgetView: Send {
    /// A message was appended to the end of the transcript.
    fn message_appended(&mut self, message: &Message);

    /// The panel flipped between hidden and visible.
    fn panel_visibility_changed(&mut self, visible: bool);

    /// The input box should be cleared (the user's text was accepted).
    fn input_cleared(&mut self);

    /// The booking status line changed.
    fn booking_status_changed(&mut self, status: &str);
}

/// View that records every event, for assertions in tests.
#[derive(Debug, Default)]
pub struct RecordingView {
    /// Appended messages, in order.
    pub messages: Vec<Message>,
    /// Visibility changes, in order.
    pub visibility: Vec<bool>,
    /// How many times the input was cleared.
    pub input_clears: usize,
    /// Booking status updates, in order.
    pub statuses: Vec<String>,
}

impl RecordingView {
    /// Create an empty recording view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent booking status, if any.
    #[must_use]
    pub fn last_status(&self) -> Option<&str> {
        self.statuses.last().map(String::as_str)
    }
}

impl WidgetView for RecordingView {
    fn message_appended(&mut self, message: &Message) {
        self.messages.push(message.clone());
    }

    fn panel_visibility_changed(&mut self, visible: bool) {
        self.visibility.push(visible);
    }

    fn input_cleared(&mut self) {
        self.input_clears += 1;
    }

    fn booking_status_changed(&mut self, status: &str) {
        self.statuses.push(status.to_string());
    }
}
