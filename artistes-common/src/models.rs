//! Artist record and request models

use serde::{Deserialize, Serialize};

/// Stored artist record
///
/// Field order is the on-disk order: `id`, `name`, `genre`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub genre: String,
}

impl Artist {
    pub fn new(id: impl Into<String>, name: impl Into<String>, genre: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            genre: genre.into(),
        }
    }

    /// Overwrite the editable fields, keeping `id`
    pub fn apply(&mut self, input: ArtistInput) {
        self.name = input.name;
        self.genre = input.genre;
    }
}

/// Request body for create and update
///
/// Clients never choose ids; an `id` field in the body is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistInput {
    pub name: String,
    pub genre: String,
}

impl ArtistInput {
    pub fn new(name: impl Into<String>, genre: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            genre: genre.into(),
        }
    }

    /// Attach a service-assigned id
    pub fn into_artist(self, id: String) -> Artist {
        Artist {
            id,
            name: self.name,
            genre: self.genre,
        }
    }
}
