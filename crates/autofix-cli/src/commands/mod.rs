//! Command handlers, one per binary.

pub mod clone;
pub mod fix;
