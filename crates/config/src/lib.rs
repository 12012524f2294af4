//! Configuration management for the sprintboard application.
//!
//! This crate handles loading, validating, and persisting configuration
//! files.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`server`]: Backlog server connection settings
//! - [`cache`]: Sub-backlog cache time-to-live
//! - [`board`]: Table, chooser, and daily-work view settings
//! - [`logging`]: Log level and log file
//! - [`persistence`]: Config file discovery, reading, and writing
//! - [`error`]: Error types for configuration operations
//!
//! # Example File
//!
//! ```json5
//! {
//!   // Omit `server` to run on built-in demo data.
//!   server: { base_url: "https://tracker.example.com" },
//!   cache: { ttl_secs: 300 },
//!   table: { border_per_column: 0.4 },
//!   chooser: { selected_products: [1] },
//!   daily_work: { view_type: "work_queue" },
//!   log: { level: "debug" },
//! }
//! ```

pub mod board;
pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod persistence;
pub mod server;

pub use board::{ChooserSettings, DailyWorkSettings, TableSettings};
pub use cache::CacheConfig;
pub use config::Config;
pub use error::{ConfigError, Result};
pub use logging::LogConfig;
pub use server::ServerConfig;
