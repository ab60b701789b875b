//! JSON file backed storage

use std::path::{Path, PathBuf};

use artistes_common::{Artist, Error, Result};
use async_trait::async_trait;
use tracing::{debug, error, info};

use super::ArtistRepository;

/// Stores the collection as one pretty-printed JSON array
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file a new collection is written to before replacing the data file
    pub fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Create the data file with an empty array if it does not exist yet
    ///
    /// Returns `true` when a file was created.
    pub async fn ensure_exists(&self) -> Result<bool> {
        if tokio::fs::try_exists(&self.path).await? {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        self.write_all(&[]).await?;

        info!("Created empty data file {}", self.path.display());
        Ok(true)
    }

    fn read_error(&self, reason: impl ToString) -> Error {
        Error::FileRead {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    fn write_error(&self, reason: impl ToString) -> Error {
        Error::FileWrite {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl ArtistRepository for JsonFileRepository {
    async fn read_all(&self) -> Result<Vec<Artist>> {
        debug!("Reading artists from {}", self.path.display());

        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                error!("Data file {} does not exist", self.path.display());
                return Err(Error::FileMissing(self.path.clone()));
            }
            Err(e) => {
                error!("Failed to read {}: {}", self.path.display(), e);
                return Err(self.read_error(e));
            }
        };

        if content.trim().is_empty() {
            debug!("Data file {} is empty", self.path.display());
            return Ok(Vec::new());
        }

        // `null` is treated like an empty file
        let artists = serde_json::from_str::<Option<Vec<Artist>>>(&content)
            .map_err(|e| {
                error!("Failed to parse {}: {}", self.path.display(), e);
                self.read_error(e)
            })?
            .unwrap_or_default();

        debug!(count = artists.len(), "Read artists");
        Ok(artists)
    }

    async fn write_all(&self, artists: &[Artist]) -> Result<()> {
        debug!("Writing artists to {}", self.path.display());

        let json = serde_json::to_string_pretty(artists).map_err(|e| self.write_error(e))?;

        // Stage next to the data file so the rename stays on one filesystem
        let staging = self.staging_path();
        if let Err(e) = tokio::fs::write(&staging, json).await {
            error!("Failed to write {}: {}", staging.display(), e);
            return Err(self.write_error(e));
        }
        if let Err(e) = tokio::fs::rename(&staging, &self.path).await {
            error!("Failed to replace {}: {}", self.path.display(), e);
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(self.write_error(e));
        }

        debug!(count = artists.len(), "Wrote artists");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Vec<Artist> {
        vec![
            Artist::new("1", "Artiste 1", "Pop"),
            Artist::new("2", "Artiste 2", "Rock"),
        ]
    }

    #[tokio::test]
    async fn test_missing_file_is_file_missing() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("artistes.json"));

        let err = repo.read_all().await.unwrap_err();
        assert!(matches!(err, Error::FileMissing(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_garbage_is_file_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("artistes.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileRepository::new(&path).read_all().await.unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_directory_is_file_read() {
        let dir = TempDir::new().unwrap();

        let err = JsonFileRepository::new(dir.path()).read_all().await.unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_empty_and_null_files_are_empty_collections() {
        let dir = TempDir::new().unwrap();

        let empty = dir.path().join("empty.json");
        std::fs::write(&empty, "  \n").unwrap();
        assert!(JsonFileRepository::new(&empty).read_all().await.unwrap().is_empty());

        let null = dir.path().join("null.json");
        std::fs::write(&null, "null").unwrap();
        assert!(JsonFileRepository::new(&null).read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_write_is_pretty_printed_and_reads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("artistes.json");
        let repo = JsonFileRepository::new(&path);

        repo.write_all(&sample()).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n"));
        assert!(text.contains("\"id\": \"1\",\n    \"name\": \"Artiste 1\",\n    \"genre\": \"Pop\""));

        assert_eq!(repo.read_all().await.unwrap(), sample());
    }

    #[tokio::test]
    async fn test_write_replaces_previous_content() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("artistes.json"));

        repo.write_all(&sample()).await.unwrap();
        repo.write_all(&sample()[..1]).await.unwrap();

        assert_eq!(repo.read_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_write_into_missing_directory_is_file_write() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("nope").join("artistes.json"));

        let err = repo.write_all(&sample()).await.unwrap_err();
        assert!(matches!(err, Error::FileWrite { .. }), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_write_leaves_no_staging_file() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("artistes.json"));

        repo.write_all(&sample()).await.unwrap();

        assert_eq!(repo.staging_path(), dir.path().join("artistes.json.tmp"));
        assert!(!repo.staging_path().exists());
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("artistes.json");
        let repo = JsonFileRepository::new(&path);
        repo.write_all(&sample()).await.unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        // A directory in the staging slot makes the staged write fail
        std::fs::create_dir(repo.staging_path()).unwrap();

        let err = repo.write_all(&sample()[..1]).await.unwrap_err();
        assert!(matches!(err, Error::FileWrite { .. }), "got {:?}", err);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
        assert_eq!(repo.read_all().await.unwrap(), sample());
    }

    #[tokio::test]
    async fn test_ensure_exists_creates_once() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("Data").join("artistes.json"));

        assert!(repo.ensure_exists().await.unwrap());
        assert!(!repo.ensure_exists().await.unwrap());
        assert!(repo.read_all().await.unwrap().is_empty());
    }
}
