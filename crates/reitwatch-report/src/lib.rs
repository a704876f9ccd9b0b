//! Rendering for reitwatch digests: the static HTML dashboard and the
//! Telegram message body. Both renderers are pure functions over a
//! [`reitwatch_core::Digest`]; writing the file and delivering the message
//! are the caller's concern.

mod dashboard;
mod message;

pub use dashboard::render_dashboard;
pub use message::digest_message;
