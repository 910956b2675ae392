//! Terminal UI: app shell, prompt commands, forms, and rendering.

pub mod app;
pub mod console;
pub mod forms;
pub mod render;

pub use app::{spawn_line_reader, AdminApp};
