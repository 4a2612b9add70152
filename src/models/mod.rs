//! Host-side models loaded from external sources.

pub mod config;
