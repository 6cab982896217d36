pub mod config;
mod core;
pub mod intake;
pub mod sched;
pub mod tasks;
pub mod types;

pub use self::core::{EngineOutput, PressEngine};
