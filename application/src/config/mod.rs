//! Application-level configuration.
//!
//! - [`ExecutionParams`]: wave executor and loop control (concurrency,
//!   timeouts, retries, iterations)

pub mod execution_params;

pub use execution_params::ExecutionParams;
