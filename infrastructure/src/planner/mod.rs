//! Planner adapters
//!
//! - [`ScriptedPlanner`]: replays a TOML/JSON [`PlanScript`]

mod scripted;

pub use scripted::{PlanScript, ScriptedPlanner};
