//! Application layer: the outer driver for conversation events.
//!
//! This module defines the `ConversationEngine`, which loads the session for
//! a chat, runs the pure transition function and executes the effects it
//! requests through the platform ports.

pub mod engine;
