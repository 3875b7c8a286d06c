//! AI Discovery — terminal chat client for the AI Business Acceleration
//! Discovery flow.
//!
//! All intelligence (question generation, agent ranking, report writing)
//! lives behind an external HTTP webhook; this crate owns the conversation
//! state, the webhook call, and the report rendering (on screen and as PDF).

pub mod channels;
pub mod config;
pub mod error;
pub mod report;
pub mod session;
pub mod webhook;
