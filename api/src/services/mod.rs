//! External service integrations.
//!
//! Result emails and the dispatcher that feeds them from engine events.

pub mod email;
pub mod notifications;
