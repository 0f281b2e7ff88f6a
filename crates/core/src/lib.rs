//! Core types for moviedb
//!
//! Domain types, policies, constants and configuration shared by every
//! other crate in the workspace.

pub mod config;
pub mod constants;
pub mod env_config;
mod error;
mod movie;
mod policy;

pub use config::{AppConfig, ConfigFile};
pub use error::*;
pub use movie::*;
pub use policy::*;
