//! Widget controller, transcript, and render seam.

pub mod controller;
pub mod transcript;
pub mod view;

pub use controller::{
    BOOKING_IN_PROGRESS, BOOKING_NETWORK_ERROR, ChatWidget, DEFAULT_WELCOME_DELAY,
    SEND_FAILED_MESSAGE, WELCOME_MESSAGE,
};
pub use transcript::{Message, Sender, Transcript};
pub use view::{RecordingView, WidgetView};
