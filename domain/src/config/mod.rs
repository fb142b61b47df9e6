//! Configuration value objects for the domain layer

mod validation;

pub use validation::{ConfigIssue, ConfigIssueCode, Severity};
