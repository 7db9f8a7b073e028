//! Configuration Module
//!
//! Handles application configuration loading and the capture setting
//! catalogs.

mod app_config;
mod catalog;
mod error;

pub use app_config::AppConfig;
pub use catalog::{Catalog, FrameRate, Resolution};
pub use error::ConfigError;
