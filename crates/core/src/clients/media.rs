use async_trait::async_trait;
use axum::body::Bytes;
use estate_primitives::error::ApiError;
use std::path::{Path, PathBuf};
use tracing::{error, warn};
use uuid::Uuid;

/// A file received in a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn is_image(&self) -> bool {
        self.content_type
            .trim()
            .to_ascii_lowercase()
            .starts_with("image/")
    }
}

/// Persists uploaded media and hands back public references.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn store(&self, file: &UploadedFile) -> Result<String, ApiError>;

    /// Removes a previously stored file. Unknown references are ignored.
    async fn remove(&self, reference: &str) -> Result<(), ApiError>;
}

/// Writes uploads into a directory served statically under `base_url`.
#[derive(Debug, Clone)]
pub struct LocalMediaStore {
    root: PathBuf,
    base_url: String,
}

impl LocalMediaStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn extension(file: &UploadedFile) -> String {
        let from_name = file
            .file_name
            .as_deref()
            .and_then(|n| Path::new(n).extension())
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .filter(|e| !e.is_empty() && e.len() <= 5 && e.chars().all(|c| c.is_ascii_alphanumeric()));

        from_name.unwrap_or_else(|| {
            match file.content_type.trim().to_ascii_lowercase().as_str() {
                "image/jpeg" | "image/jpg" => "jpg".into(),
                "image/png" => "png".into(),
                "image/gif" => "gif".into(),
                "image/webp" => "webp".into(),
                _ => "bin".into(),
            }
        })
    }

    fn file_name_of<'a>(&self, reference: &'a str) -> Option<&'a str> {
        let name = reference
            .strip_prefix(self.base_url.as_str())?
            .trim_start_matches('/');

        let valid = !name.is_empty()
            && !name.contains('/')
            && !name.contains('\\')
            && !name.starts_with('.');

        valid.then_some(name)
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn store(&self, file: &UploadedFile) -> Result<String, ApiError> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            error!(error = %e, dir = %self.root.display(), "Failed to create upload directory");
            ApiError::Internal("Failed to store upload".into())
        })?;

        let name = format!("{}.{}", Uuid::new_v4(), Self::extension(file));
        let path = self.root.join(&name);

        tokio::fs::write(&path, &file.bytes).await.map_err(|e| {
            error!(error = %e, path = %path.display(), "Failed to write upload");
            ApiError::Internal("Failed to store upload".into())
        })?;

        Ok(format!("{}/{}", self.base_url, name))
    }

    async fn remove(&self, reference: &str) -> Result<(), ApiError> {
        let Some(name) = self.file_name_of(reference) else {
            return Ok(());
        };

        match tokio::fs::remove_file(self.root.join(name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                warn!(error = %e, reference, "Failed to remove stored upload");
                Err(ApiError::Internal("Failed to remove upload".into()))
            }
        }
    }
}
