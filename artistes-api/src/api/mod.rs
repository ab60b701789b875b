//! HTTP API handlers for artistes-api

pub mod artists;
pub mod buildinfo;
pub mod health;

pub use artists::artist_routes;
pub use buildinfo::get_build_info;
pub use health::health_routes;
