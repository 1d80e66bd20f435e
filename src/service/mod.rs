//! Game service boundary
//!
//! A `GameSession` owns one battle at a time and is what a presentation
//! layer talks to. It validates every command before the engine sees it and
//! reports failures as coded `ServiceError`s.

mod error;
mod session;

pub use error::{ServiceError, ServiceErrorCode};
pub use session::GameSession;
