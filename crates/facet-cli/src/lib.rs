//! CLI library components for the facet filter tool.

pub mod commands;
pub mod logging;
pub mod render;
