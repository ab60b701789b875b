//! Whole-collection artist storage
//!
//! The collection is the unit of persistence: every read returns all
//! records and every write replaces all records.

use artistes_common::{Artist, Result};
use async_trait::async_trait;

mod json_file;
mod memory;

pub use json_file::JsonFileRepository;
pub use memory::InMemoryRepository;

/// Storage adapter for the artist collection
#[async_trait]
pub trait ArtistRepository: Send + Sync {
    /// Read the full collection
    async fn read_all(&self) -> Result<Vec<Artist>>;

    /// Replace the full collection
    async fn write_all(&self, artists: &[Artist]) -> Result<()>;
}
