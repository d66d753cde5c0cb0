//! Wire types for the chat and booking endpoints.
//!
//! These mirror the server's API DTOs byte-for-byte on the wire: the chat
//! endpoint takes `{message, session_id}`, the booking endpoint takes the
//! flat string-to-string object the widget form submits verbatim.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Fallback reply shown when the server returns neither `reply` nor `message`.
pub const NO_REPLY: &str = "No reply.";

// =============================================================================
// Chat API Types
// =============================================================================

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// The user's message.
    pub message: String,
    /// Session ID correlating chat turns server-side.
    pub session_id: String,
}

/// Response body from `POST /api/chat`.
///
/// The server answers with `reply` on the normal path but some dialog flows
/// use `message` instead; both are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    /// Primary reply text.
    #[serde(default)]
    pub reply: Option<String>,
    /// Alternate reply field used by some flows.
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatResponse {
    /// Text to render as the bot reply.
    ///
    /// Ordered fallback: `reply`, then `message`, then [`NO_REPLY`]. Empty
    /// strings count as absent, so `{"reply": ""}` still falls through.
    #[must_use]
    pub fn reply_text(&self) -> &str {
        [self.reply.as_deref(), self.message.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or(NO_REPLY)
    }
}

// =============================================================================
// Booking API Types
// =============================================================================

/// Request body for `POST /api/book`.
///
/// Serializes to a flat string map. The named fields are the ones the
/// booking flow reads back for the confirmation message; anything else the
/// form carries goes through `extra` untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingForm {
    /// Service being booked (e.g. "Haircut").
    pub service: String,
    /// Customer name.
    pub name: String,
    /// Booking date, `YYYY-MM-DD`.
    pub date: String,
    /// Booking time, `HH:MM`.
    pub time: String,
    /// Customer phone number.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub phone: String,
    /// Optional profile field.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gender: String,
    /// Optional profile field.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub age: String,
    /// Any additional form fields, submitted verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl BookingForm {
    /// Build a form from loose `key=value` pairs, e.g. parsed CLI input.
    ///
    /// Known keys land in the named fields; unknown keys go to `extra`.
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut form = Self::default();
        for (key, value) in fields {
            let key = key.into();
            let value = value.into();
            match key.as_str() {
                "service" => form.service = value,
                "name" => form.name = value,
                "date" => form.date = value,
                "time" => form.time = value,
                "phone" => form.phone = value,
                "gender" => form.gender = value,
                "age" => form.age = value,
                _ => {
                    form.extra.insert(key, value);
                }
            }
        }
        form
    }
}

/// Response body from `POST /api/book`.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingResponse {
    /// Whether the booking was accepted.
    pub ok: bool,
    /// Identifier of the created booking, present when `ok` is true.
    #[serde(default)]
    pub booking_id: Option<String>,
    /// Server-provided error text, present when `ok` is false.
    #[serde(default)]
    pub msg: Option<String>,
}
