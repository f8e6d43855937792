//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, error types, and the small amount of
//! infrastructure (state machines, upcasting) the other domain modules share.

mod errors;
mod percentage;
mod state_machine;
mod upcaster;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use percentage::Percentage;
pub use state_machine::StateMachine;
pub use upcaster::{UpcastError, Upcaster, UpcasterRegistry};
