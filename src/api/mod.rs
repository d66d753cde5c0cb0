//! Backend API: wire types and the HTTP client.

pub mod client;
pub mod types;

pub use client::{ApiClient, HttpApiClient};
pub use types::{BookingForm, BookingResponse, ChatRequest, ChatResponse, NO_REPLY};
