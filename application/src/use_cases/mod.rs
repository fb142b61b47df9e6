//! Use cases for the application layer

pub mod execute_wave;
pub mod run_agent;
pub(crate) mod shared;
