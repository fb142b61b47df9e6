//! Orchestration domain
//!
//! Pure types for the plan → execute → re-plan loop: waves and their
//! resolver, the write-once result accumulator, planner output, the
//! conversation history and the terminal [`LoopOutcome`](outcome::LoopOutcome).

pub mod history;
pub mod outcome;
pub mod phase;
pub mod plan;
pub mod results;
pub mod wave;
