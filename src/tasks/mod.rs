//! Background tasks module
//!
//! Tasks that consume timer events alongside the console loop.

pub mod announcer;
pub mod renderer;

// Re-export main functions
pub use announcer::announcer_task;
pub use renderer::{event_renderer_task, RenderOptions};
