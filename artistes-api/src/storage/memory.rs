//! In-memory storage for tests and embedding

use artistes_common::{Artist, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::ArtistRepository;

/// Holds the collection in a lock-protected vector; never fails
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    artists: RwLock<Vec<Artist>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_artists(artists: Vec<Artist>) -> Self {
        Self {
            artists: RwLock::new(artists),
        }
    }
}

#[async_trait]
impl ArtistRepository for InMemoryRepository {
    async fn read_all(&self) -> Result<Vec<Artist>> {
        Ok(self.artists.read().await.clone())
    }

    async fn write_all(&self, artists: &[Artist]) -> Result<()> {
        *self.artists.write().await = artists.to_vec();
        Ok(())
    }
}
