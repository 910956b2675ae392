//! Controller layer: user intents, reducer state transitions, and command orchestration.

pub mod events;
pub mod orchestration;
pub mod reducer;
