//! # Printer Module
//!
//! This module provides physical page definitions for the print surface.
//!
//! ## Modules
//!
//! - [`config`]: Page size profiles and unit conversion

pub mod config;

pub use config::PageProfile;
