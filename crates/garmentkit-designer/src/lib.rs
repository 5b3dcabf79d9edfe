//! # GarmentKit Designer
//!
//! The design canvas engine: compose text, shapes, images and stickers on the
//! front and back of a garment, transform them with pointer gestures, undo
//! and redo per side, and export a rendered raster plus a print-ready
//! specification in real-world units.
//!
//! ## Core Components
//!
//! - **Model**: Design elements, garment templates and colors
//! - **Element Store**: Ordered element list per side; order is z-order
//! - **Selection & Clipboard**: Single/multi selection, copy and paste
//! - **History**: Snapshot undo/redo stack per side, capped
//! - **Transform**: Drag, resize and rotate math under zoom and rotation
//! - **Coordinates**: Canvas pixels, design-area pixels and centimeters
//! - **Renderer**: Fast preview and supersampled full export
//! - **Print Spec**: Dimensioned export for print vendors
//!
//! ## Architecture
//!
//! ```text
//! pointer input
//!   └── DesignerState (gesture state machine)
//!         ├── DesignDocument (front/back ElementStore)
//!         ├── HistoryManager (observes after each mutation)
//!         ├── SelectionManager / Clipboard / Viewport
//!         └── EventBus (observers)
//!
//! Renderer + CoordinateMapper ── preview, export, print spec
//! Collaborators ── ProjectStore, UploadService, AssetSource, ImageGenerator
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use garmentkit_designer::{DesignerState, GarmentTemplate, ShapeKind};
//!
//! let mut state = DesignerState::default();
//! state.set_template(GarmentTemplate::new("tee", 400, 500).with_size("M", 30.0, 40.0))?;
//! state.add_shape(ShapeKind::Circle)?;
//! let spec = state.print_spec();
//! ```

pub mod clipboard;
pub mod collaborators;
pub mod coordinates;
pub mod designer_state;
pub mod document;
pub mod element_store;
pub mod error;
pub mod font_manager;
pub mod history;
pub mod model;
pub mod print_spec;
pub mod renderer;
pub mod selection_manager;
pub mod serialization;
pub mod transform;
pub mod viewport;

pub use clipboard::Clipboard;
pub use collaborators::{
    AssetSource, CollaboratorResult, ImageGenerator, LocalAssetSource, ProjectStore,
    SimulatedGenerator, UploadService,
};
pub use coordinates::{pixel_to_cm_ratio, CanvasRect, CoordinateMapper};
pub use designer_state::{DesignerState, InsertTicket, PreparedSave};
pub use document::DesignDocument;
pub use element_store::{ElementStore, ReorderOp};
pub use error::{DesignerError, DesignerResult};
pub use history::{HistoryManager, HistoryStack, RecordOutcome, Snapshot, DEFAULT_HISTORY_LIMIT};
pub use model::{
    DesignArea, DesignElement, ElementKind, ElementPatch, GarmentTemplate, Point, PrintArea, Rgba,
    ShapeKind, TextAlign, TextOutline, TextShadow, MIN_ELEMENT_SIZE,
};
pub use print_spec::{build_print_spec, PrintElement, PrintSpec, PrintSpecInput, PrintSpecOptions};
pub use renderer::{render_export, render_preview};
pub use selection_manager::SelectionManager;
pub use serialization::{DesignData, PreviewImages, ProjectRecord};
pub use transform::{GestureKind, GestureState, PointerTarget, ResizeHandle};
pub use viewport::Viewport;

pub use garmentkit_core::Side;
