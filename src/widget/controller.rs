//! The chat widget controller.
//!
//! Owns the transcript and panel state, and turns user actions into the two
//! backend calls. Both collaborators are injected: the [`ApiClient`] carries
//! the HTTP side, the [`WidgetView`] renders whatever the controller decides.

use std::time::Duration;

use tracing::{debug, error, info};

use crate::api::{ApiClient, BookingForm, ChatRequest};
use crate::session::SessionId;
use crate::widget::transcript::{Message, Transcript};
use crate::widget::view::WidgetView;

/// Canned greeting appended the first time the panel opens.
pub const WELCOME_MESSAGE: &str = "Hi! I can help you book and suggest hairstyles/products. \
    Try: 'Book haircut on 2025-12-20 at 15:00 for Rahul 9876543210 male 28' or \
    'Recommend hairstyle for round face fair skin female 28'.";

/// Bot message shown when the chat request fails in transport or parsing.
pub const SEND_FAILED_MESSAGE: &str = "Sorry, something went wrong. Try again.";

/// Transient status shown while a booking request is in flight.
pub const BOOKING_IN_PROGRESS: &str = "...booking...";

/// Status shown when the booking request fails in transport.
pub const BOOKING_NETWORK_ERROR: &str = "Network error";

/// Delay before the welcome message appears on first open.
pub const DEFAULT_WELCOME_DELAY: Duration = Duration::from_millis(200);

/// Chat widget controller.
///
/// State machine: panel hidden/visible, welcome shown once, transcript
/// append-only. Actions are serialized through `&mut self`, so replies land
/// in the transcript in submission order even if a caller fires actions
/// back-to-back.
#[derive(Debug)]
pub struct ChatWidget<A, V> {
    api: A,
    view: V,
    session_id: SessionId,
    transcript: Transcript,
    panel_visible: bool,
    welcome_shown: bool,
    welcome_delay: Duration,
}

impl<A: ApiClient, V: WidgetView> ChatWidget<A, V> {
    /// Create a widget with the default welcome delay.
    pub fn new(api: A, view: V, session_id: SessionId) -> Self {
        Self::with_welcome_delay(api, view, session_id, DEFAULT_WELCOME_DELAY)
    }

    /// Create a widget with a custom welcome delay (tests use zero).
    pub fn with_welcome_delay(
        api: A,
        view: V,
        session_id: SessionId,
        welcome_delay: Duration,
    ) -> Self {
        Self {
            api,
            view,
            session_id,
            transcript: Transcript::new(),
            panel_visible: false,
            welcome_shown: false,
            welcome_delay,
        }
    }

    /// The session id this widget tags its chat turns with.
    #[must_use]
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// The transcript so far.
    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Whether the panel is currently visible.
    #[must_use]
    pub fn is_panel_visible(&self) -> bool {
        self.panel_visible
    }

    /// The injected view.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Flip the panel between hidden and visible.
    ///
    /// The first time the panel becomes visible with no bot message in the
    /// transcript, the canned welcome is appended as a bot message after a
    /// short delay. One-shot: later toggles never repeat it.
    pub async fn toggle(&mut self) {
        self.panel_visible = !self.panel_visible;
        self.view.panel_visibility_changed(self.panel_visible);
        debug!(visible = self.panel_visible, "Panel toggled");

        if self.panel_visible && !self.welcome_shown && !self.transcript.has_bot_message() {
            self.welcome_shown = true;
            tokio::time::sleep(self.welcome_delay).await;
            self.append(Message::bot(WELCOME_MESSAGE));
        }
    }

    /// Force the panel hidden. Idempotent.
    pub fn close(&mut self) {
        if self.panel_visible {
            self.panel_visible = false;
            self.view.panel_visibility_changed(false);
            debug!("Panel closed");
        }
    }

    /// Append a message to the transcript and notify the view.
    pub fn append(&mut self, message: Message) {
        self.transcript.push(message.clone());
        self.view.message_appended(&message);
    }

    /// Send one chat turn.
    ///
    /// Whitespace-only input is a silent no-op. The user bubble and the
    /// input clear happen before the request goes out (optimistic UI); the
    /// bot bubble is the server's reply, the ordered fallback default, or
    /// the fixed apology on transport failure. Never returns an error: every
    /// outcome ends up in the transcript.
    pub async fn send_message(&mut self, input: &str) {
        let text = input.trim();
        if text.is_empty() {
            return;
        }

        self.append(Message::user(text));
        self.view.input_cleared();

        let request = ChatRequest {
            message: text.to_string(),
            session_id: self.session_id.as_str().to_string(),
        };

        info!(
            session_id = %self.session_id,
            message_length = text.len(),
            "Sending chat message"
        );

        match self.api.send_chat(&request).await {
            Ok(response) => {
                self.append(Message::bot(response.reply_text()));
            }
            Err(err) => {
                error!(session_id = %self.session_id, error = %err, "Chat request failed");
                self.append(Message::bot(SEND_FAILED_MESSAGE));
            }
        }
    }

    /// Submit a booking form.
    ///
    /// Status goes to `...booking...` immediately, then to one of
    /// `Booked! ID: <id>`, `Error: <msg>`, or `Network error`. On success a
    /// bot confirmation summarizing the *submitted* service, name, date and
    /// time is appended; the server response is not consulted for those
    /// values, matching the original widget.
    pub async fn submit_booking(&mut self, form: &BookingForm) {
        self.view.booking_status_changed(BOOKING_IN_PROGRESS);

        info!(
            session_id = %self.session_id,
            service = %form.service,
            date = %form.date,
            time = %form.time,
            "Submitting booking"
        );

        match self.api.book(form).await {
            Ok(response) if response.ok => {
                let id = response.booking_id.as_deref().unwrap_or("unknown");
                self.view
                    .booking_status_changed(&format!("Booked! ID: {id}"));
                self.append(Message::bot(format!(
                    "I booked {} for {} on {} at {}",
                    form.service, form.name, form.date, form.time
                )));
            }
            Ok(response) => {
                let msg = response.msg.as_deref().unwrap_or("unknown");
                self.view.booking_status_changed(&format!("Error: {msg}"));
            }
            Err(err) => {
                error!(session_id = %self.session_id, error = %err, "Booking request failed");
                self.view.booking_status_changed(BOOKING_NETWORK_ERROR);
            }
        }
    }
}
