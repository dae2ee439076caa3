//! Command implementations for the Estatic CLI.

pub mod build;
pub mod check;
pub mod hubs;
pub mod inject;
pub mod sitemap;
