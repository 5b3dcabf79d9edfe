//! Error types for the design canvas engine.
//!
//! Geometry problems (undersized resizes, negative drags) are clamped by the
//! transform engine and never show up here. What remains are rejected
//! operations (locked or missing elements, overlapping gestures) and failures
//! reported by collaborators during load, save, upload and export.

use garmentkit_core::CollaboratorError;
use thiserror::Error;

use crate::transform::GestureKind;

/// Errors produced by the designer.
#[derive(Error, Debug)]
pub enum DesignerError {
    /// No element with this id exists on the side being edited.
    #[error("Element '{id}' not found")]
    ElementNotFound { id: String },

    /// The element is locked; only unlocking is allowed.
    #[error("Element '{id}' is locked")]
    ElementLocked { id: String },

    /// An element with this id already exists on the side.
    #[error("Element id '{id}' already exists")]
    DuplicateId { id: String },

    /// A pointer gesture is already active.
    #[error("A {active} gesture is already in progress")]
    GestureInProgress { active: GestureKind },

    /// The operation needs a garment template and none is loaded.
    #[error("No garment template loaded")]
    NoTemplate,

    /// The garment template is malformed.
    #[error("Invalid garment template: {reason}")]
    InvalidTemplate { reason: String },

    /// The selected size has no print-area mapping in the template.
    #[error("Unknown garment size '{size}'")]
    UnknownSize { size: String },

    /// A save is already in flight.
    #[error("A save is already in progress")]
    SaveInProgress,

    /// No image insertion is waiting for its dimensions.
    #[error("No pending image insertion")]
    NoPendingInsert,

    /// The pending insertion was cancelled or superseded.
    #[error("Image insertion was cancelled")]
    InsertCancelled,

    /// The upload collaborator failed.
    #[error("Upload failed: {0}")]
    Upload(#[source] CollaboratorError),

    /// Image bytes could not be decoded.
    #[error("Could not decode image: {reason}")]
    Decode { reason: String },

    /// Loading a project or its template failed.
    #[error("Could not load design: {0}")]
    Load(#[source] CollaboratorError),

    /// The persistence collaborator rejected or failed the save.
    #[error("Could not save design: {0}")]
    Save(#[source] CollaboratorError),

    /// Image generation failed.
    #[error("Image generation failed: {0}")]
    Generate(#[source] CollaboratorError),

    /// Rasterization or encoding failed.
    #[error("Render error: {reason}")]
    Render { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DesignerError {
    pub(crate) fn not_found(id: impl Into<String>) -> Self {
        Self::ElementNotFound { id: id.into() }
    }

    pub(crate) fn locked(id: impl Into<String>) -> Self {
        Self::ElementLocked { id: id.into() }
    }

    pub(crate) fn render(reason: impl Into<String>) -> Self {
        Self::Render {
            reason: reason.into(),
        }
    }

    /// Whether the error came from an external collaborator.
    pub fn is_collaborator_error(&self) -> bool {
        matches!(
            self,
            Self::Upload(_) | Self::Load(_) | Self::Save(_) | Self::Generate(_)
        )
    }
}

impl From<image::ImageError> for DesignerError {
    fn from(err: image::ImageError) -> Self {
        Self::Decode {
            reason: err.to_string(),
        }
    }
}

/// Result type alias for designer operations.
pub type DesignerResult<T> = Result<T, DesignerError>;
