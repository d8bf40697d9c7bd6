//! Command implementations, one per mode.

pub mod list;
pub mod rotate;
pub mod validate;
