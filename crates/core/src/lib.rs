//! Core types and shared functionality for go2web.
//!
//! This crate provides:
//! - Bounded in-memory page cache
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{Page, PageCache};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
