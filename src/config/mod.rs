//! Configuration and constants
//!
//! - [`defaults`] - File names, version requirements and default values

pub mod defaults;
