//! CLI library components for the EMR note toolkit.

pub mod logging;
pub mod summary;
