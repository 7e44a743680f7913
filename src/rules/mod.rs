//! Action rules.
//!
//! `ActionValidator` decides whether the agent's action is legal for the
//! current state and lists every legal action. The engine applies only
//! actions that come back `Validated`; anything else becomes a no-op.

pub mod validator;

pub use validator::{ActionValidator, Validated};
