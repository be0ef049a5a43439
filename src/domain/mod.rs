//! Domain layer: the conversation state machine and its validators.
//!
//! Nothing in this module performs I/O or touches platform types. Transitions
//! are computed by a pure function and returned as a list of effects for the
//! application layer to execute.

pub mod event;
pub mod geometry;
pub mod machine;
pub mod ports;
pub mod replies;
pub mod session;
pub mod url;
