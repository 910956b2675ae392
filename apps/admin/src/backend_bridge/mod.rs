//! Bridge between the controller loop and the async backend worker.

pub mod commands;
pub mod runtime;
