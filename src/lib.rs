//! Role Compass - Guided career exploration
//!
//! This crate walks a user through picking focus categories and personal
//! traits, then ranks candidate roles by how well they fit. Reference data is
//! loaded from loosely shaped JSON/YAML documents and normalized; selections
//! persist between sessions.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
