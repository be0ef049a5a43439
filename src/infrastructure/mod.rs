//! Infrastructure layer: concrete adapters behind the domain ports.

pub mod in_memory;
pub mod telegram;
