//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and operations
//! - Stable handle collections
//! - Frame timing with pause support
//! - Seeded randomness
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod time;
pub mod random;
pub mod logging;
