#![cfg_attr(not(test), no_std)]

pub mod button;
pub(crate) mod config;
pub mod gesture;

pub use button::{EngineOutput, PressEngine};
