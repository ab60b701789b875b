//! Artist business rules
//!
//! Every operation reloads the full collection from storage. Mutations hold
//! `write_lock` across their read-modify-write cycle so two requests served
//! by the same process cannot overwrite each other. Nothing guards against
//! another process writing the same file.

use std::sync::Arc;

use artistes_common::{Artist, ArtistInput, Error, Result};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::storage::ArtistRepository;

/// Uniqueness and existence rules over an injected repository
#[derive(Clone)]
pub struct ArtistService {
    repository: Arc<dyn ArtistRepository>,
    write_lock: Arc<Mutex<()>>,
}

impl ArtistService {
    pub fn new(repository: Arc<dyn ArtistRepository>) -> Self {
        Self {
            repository,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn list_all(&self) -> Result<Vec<Artist>> {
        let artists = self.repository.read_all().await?;
        info!(count = artists.len(), "Listed artists");
        Ok(artists)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Artist> {
        let artists = self.repository.read_all().await?;

        match artists.into_iter().find(|a| a.id == id) {
            Some(artist) => {
                info!(id, name = %artist.name, "Found artist");
                Ok(artist)
            }
            None => {
                warn!(id, "Artist not found");
                Err(Error::NotFound(id.to_string()))
            }
        }
    }

    /// Create a record, assigning its id
    ///
    /// Names are unique (case-sensitive).
    pub async fn add(&self, input: ArtistInput) -> Result<Artist> {
        validate(&input)?;

        let _guard = self.write_lock.lock().await;
        let mut artists = self.repository.read_all().await?;

        if artists.iter().any(|a| a.name == input.name) {
            warn!(name = %input.name, "Artist already exists");
            return Err(Error::AlreadyExists(input.name));
        }

        let artist = input.into_artist(next_id(&artists)?);
        artists.push(artist.clone());
        self.repository.write_all(&artists).await?;

        info!(id = %artist.id, name = %artist.name, "Added artist");
        Ok(artist)
    }

    /// Overwrite `name` and `genre` of an existing record
    ///
    /// The new name must not belong to any other record.
    pub async fn update(&self, id: &str, input: ArtistInput) -> Result<()> {
        validate(&input)?;

        let _guard = self.write_lock.lock().await;
        let mut artists = self.repository.read_all().await?;

        let Some(index) = artists.iter().position(|a| a.id == id) else {
            warn!(id, "Artist not found for update");
            return Err(Error::NotFound(id.to_string()));
        };
        if artists.iter().any(|a| a.id != id && a.name == input.name) {
            warn!(id, name = %input.name, "Rename would duplicate an existing artist");
            return Err(Error::AlreadyExists(input.name));
        }

        let artist = &mut artists[index];
        artist.apply(input);
        let (name, genre) = (artist.name.clone(), artist.genre.clone());

        self.repository.write_all(&artists).await?;

        info!(id, %name, %genre, "Updated artist");
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut artists = self.repository.read_all().await?;

        let Some(index) = artists.iter().position(|a| a.id == id) else {
            warn!(id, "Artist not found for deletion");
            return Err(Error::NotFound(id.to_string()));
        };
        artists.remove(index);

        self.repository.write_all(&artists).await?;

        info!(id, "Deleted artist");
        Ok(())
    }

    /// Case-insensitive substring match on `name`, in stored order
    pub async fn search(&self, fragment: &str) -> Result<Vec<Artist>> {
        let needle = fragment.to_lowercase();
        let found: Vec<Artist> = self
            .repository
            .read_all()
            .await?
            .into_iter()
            .filter(|a| a.name.to_lowercase().contains(&needle))
            .collect();

        info!(fragment, count = found.len(), "Searched artists");
        Ok(found)
    }
}

fn validate(input: &ArtistInput) -> Result<()> {
    if input.name.trim().is_empty() {
        return Err(Error::InvalidInput("artist name must not be empty".to_string()));
    }
    Ok(())
}

/// One past the highest numeric id
///
/// Equal to `len + 1` while ids are contiguous, and never hands out an id
/// that is still in use after deletions.
fn next_id(artists: &[Artist]) -> Result<String> {
    let highest = artists
        .iter()
        .filter_map(|a| a.id.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
        .max(artists.len() as u64);

    highest
        .checked_add(1)
        .map(|id| id.to_string())
        .ok_or(Error::IdsExhausted)
}
