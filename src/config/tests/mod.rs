//! Unit tests for configuration loading and precedence.
//!
//! Tests are organised into modules by functional area:
//! - `cli_flags`: Command-line parsing of short and long flags
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `operation_mode`: Action parsing tests
//! - `field_resolution`: Token, organisation, topic, and repository resolution

mod helpers;
mod operation_mode;
