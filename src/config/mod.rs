//! Configuration management for court-ratings
//!
//! This module handles configuration loading from TOML files and environment
//! variables, validation, and default values for a rating run.

pub mod app;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, IoSettings, PeriodSettings, ServiceSettings};
pub use rating::{ContestModelKind, RatingConfig};
