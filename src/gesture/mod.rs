pub mod plan;
pub mod tasks;
