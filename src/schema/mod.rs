//! Schema module - Configuration and seeding types for snowflake growth.

mod config;
mod seed;

pub use config::*;
pub use seed::*;
