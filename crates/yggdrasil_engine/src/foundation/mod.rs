//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Fixed-capacity collections
//! - Arena memory management
//! - Logging utilities

pub mod collections;
pub mod logging;
pub mod memory;
