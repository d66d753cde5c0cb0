//! Salon Chat Widget Client
//!
//! Client half of a salon booking/recommendation chat widget: a transport-
//! agnostic widget controller over the backend's `/api/chat` and `/api/book`
//! endpoints, with a locally persisted session identifier and an append-only
//! message transcript.
//!
//! # Architecture
//!
//! - **Controller**: explicit state machine (panel hidden/visible, one-shot
//!   welcome, transcript) with injected collaborators
//! - **API client**: reqwest-backed implementation behind the [`api::ApiClient`]
//!   seam, so tests script the backend
//! - **View**: [`widget::WidgetView`] render seam in place of direct DOM access
//! - **Session**: opaque `s_xxxxxxxx` token, generated once and persisted
//!
//! # Modules
//!
//! - [`api`]: wire types and the HTTP client
//! - [`session`]: session id bootstrap and persistence
//! - [`widget`]: transcript, view seam, and the controller
//! - [`config`]: layered configuration for the binary

pub mod api;
pub mod config;
pub mod error;
pub mod session;
pub mod widget;

pub use api::{ApiClient, BookingForm, BookingResponse, ChatRequest, ChatResponse, HttpApiClient};
pub use error::{Error, Result};
pub use session::{FileSessionStorage, MemorySessionStorage, SessionId, SessionStorage};
pub use widget::{ChatWidget, Message, RecordingView, Sender, Transcript, WidgetView};
