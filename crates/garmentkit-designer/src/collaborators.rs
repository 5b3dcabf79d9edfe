//! External collaborators the engine talks to.
//!
//! Persistence, upload storage, asset fetching and image generation are owned
//! by other services. The engine only sees these traits; the CLI and tests
//! plug in local or in-memory implementations.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use garmentkit_core::CollaboratorError;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::model::GarmentTemplate;
use crate::serialization::ProjectRecord;

/// Result type for collaborator calls.
pub type CollaboratorResult<T> = Result<T, CollaboratorError>;

/// Saved-project persistence (last writer wins).
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn load_project(&self, id: &str) -> CollaboratorResult<ProjectRecord>;

    async fn load_template(&self, template_id: &str) -> CollaboratorResult<GarmentTemplate>;

    /// Store the record and return its id.
    async fn save_project(&self, record: &ProjectRecord) -> CollaboratorResult<String>;
}

/// Turns raw image bytes into a stable reference string.
#[async_trait]
pub trait UploadService: Send + Sync {
    async fn upload(&self, bytes: &[u8], file_name: &str) -> CollaboratorResult<String>;
}

/// Fetches the bytes behind an asset reference.
#[async_trait]
pub trait AssetSource: Send + Sync {
    async fn fetch(&self, reference: &str) -> CollaboratorResult<Vec<u8>>;
}

/// Long-running image generation returning candidate references.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> CollaboratorResult<Vec<String>>;
}

/// Decode a `data:<mime>;base64,<payload>` URL.
pub fn decode_data_url(reference: &str) -> Option<CollaboratorResult<Vec<u8>>> {
    let rest = reference.strip_prefix("data:")?;
    let Some((_, payload)) = rest.split_once(";base64,") else {
        return Some(Err(CollaboratorError::Rejected {
            reason: "only base64 data URLs are supported".to_string(),
        }));
    };
    Some(STANDARD.decode(payload.trim()).map_err(|e| CollaboratorError::Rejected {
        reason: format!("invalid base64 payload: {}", e),
    }))
}

/// Resolves references as data URLs or files under a root directory.
#[derive(Debug, Clone)]
pub struct LocalAssetSource {
    root: PathBuf,
}

impl LocalAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, reference: &str) -> PathBuf {
        let trimmed = reference.strip_prefix("file://").unwrap_or(reference);
        let path = Path::new(trimmed);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

#[async_trait]
impl AssetSource for LocalAssetSource {
    async fn fetch(&self, reference: &str) -> CollaboratorResult<Vec<u8>> {
        if let Some(decoded) = decode_data_url(reference) {
            return decoded;
        }
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return Err(CollaboratorError::Rejected {
                reason: format!("remote asset '{}' is not available offline", reference),
            });
        }

        let path = self.resolve(reference);
        tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CollaboratorError::not_found(path.display().to_string()),
            _ => CollaboratorError::Other {
                message: format!("{}: {}", path.display(), e),
            },
        })
    }
}

/// Stand-in generator returning a fixed candidate list after a delay.
#[derive(Debug, Clone)]
pub struct SimulatedGenerator {
    delay: Duration,
    candidates: Vec<String>,
}

impl SimulatedGenerator {
    pub fn new(delay: Duration, candidates: Vec<String>) -> Self {
        Self { delay, candidates }
    }
}

impl Default for SimulatedGenerator {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(2),
            (1..=4)
                .map(|i| format!("generated/candidate-{}.png", i))
                .collect(),
        )
    }
}

#[async_trait]
impl ImageGenerator for SimulatedGenerator {
    async fn generate(&self, prompt: &str) -> CollaboratorResult<Vec<String>> {
        tracing::debug!("Simulating generation for prompt '{}'", prompt);
        tokio::time::sleep(self.delay).await;
        Ok(self.candidates.clone())
    }
}
