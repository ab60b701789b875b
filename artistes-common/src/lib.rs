//! # Artistes Common Library
//!
//! Shared code for the artistes service crates:
//! - Error types (`Error`, `Result`)
//! - Artist record and request models
//! - Bootstrap configuration loading

pub mod config;
pub mod error;
pub mod models;

pub use error::{Error, Result};
pub use models::{Artist, ArtistInput};
