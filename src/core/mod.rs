//! Core value types: coordinates, zoom tiers, viewport and configuration.

pub mod config;
pub mod constants;
pub mod geo;
pub mod viewport;
pub mod zoom;
