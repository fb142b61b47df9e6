//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: planning-time errors
//! - [`string`]: display helpers

pub mod error;
pub mod string;
