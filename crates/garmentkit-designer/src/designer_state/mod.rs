//! Designer state: the single owner of an editing session.
//!
//! Holds the document, per-side history, selection, clipboard, viewport,
//! gesture state and the session metadata, and publishes a [`DesignEvent`]
//! after every change.
//!
//! This module is split into submodules:
//! - `elements`: Add, remove, duplicate, reorder, lock, patch, selection, clipboard
//! - `history`: Undo/redo
//! - `gestures`: Pointer-driven drag, resize and rotate
//! - `file_io`: Load, save, render and print export
//! - `insert`: Two-phase image insertion and uploads
//! - `generate`: Cancellable image generation

mod elements;
mod file_io;
mod generate;
mod gestures;
mod history;
mod insert;

use garmentkit_core::{DesignEvent, EventBus, Side};
use garmentkit_settings::DesignerConfig;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::clipboard::Clipboard;
use crate::coordinates::CoordinateMapper;
use crate::document::DesignDocument;
use crate::element_store::ElementStore;
use crate::error::{DesignerError, DesignerResult};
use crate::history::HistoryManager;
use crate::model::{DesignElement, GarmentTemplate, MIN_ELEMENT_SIZE};
use crate::selection_manager::SelectionManager;
use crate::transform::GestureState;
use crate::viewport::Viewport;

pub use file_io::PreparedSave;
pub use insert::InsertTicket;

use insert::PendingInsert;

const DEFAULT_DESIGN_NAME: &str = "Untitled";

/// Designer state for one editing session.
#[derive(Debug)]
pub struct DesignerState {
    config: DesignerConfig,
    events: Arc<EventBus>,
    template: Option<GarmentTemplate>,
    design_name: String,
    garment_color: String,
    garment_size: String,
    project_id: Option<String>,
    document: DesignDocument,
    history: HistoryManager,
    selection: SelectionManager,
    clipboard: Clipboard,
    viewport: Viewport,
    gesture: GestureState,
    pending_insert: Option<PendingInsert>,
    next_insert_ticket: u64,
    user_uploads: Vec<String>,
    generated_images: Vec<String>,
    save_in_flight: Arc<AtomicBool>,
    is_modified: bool,
}

impl DesignerState {
    /// Creates a designer state with its own event bus.
    pub fn new(config: DesignerConfig) -> Self {
        Self::with_events(config, Arc::new(EventBus::new()))
    }

    /// Creates a designer state publishing to a shared event bus.
    pub fn with_events(config: DesignerConfig, events: Arc<EventBus>) -> Self {
        let history = HistoryManager::new(config.history.limit);
        let viewport = Viewport::new(&config.viewport);
        Self {
            config,
            events,
            template: None,
            design_name: DEFAULT_DESIGN_NAME.to_string(),
            garment_color: "#ffffff".to_string(),
            garment_size: String::new(),
            project_id: None,
            document: DesignDocument::new(),
            history,
            selection: SelectionManager::new(),
            clipboard: Clipboard::new(),
            viewport,
            gesture: GestureState::Idle,
            pending_insert: None,
            next_insert_ticket: 0,
            user_uploads: Vec::new(),
            generated_images: Vec::new(),
            save_in_flight: Arc::new(AtomicBool::new(false)),
            is_modified: false,
        }
    }

    pub fn config(&self) -> &DesignerConfig {
        &self.config
    }

    /// Configured minimum element size, never below [`MIN_ELEMENT_SIZE`].
    pub(crate) fn min_element_size(&self) -> f64 {
        let configured = self.config.geometry.min_element_size;
        if configured.is_nan() {
            MIN_ELEMENT_SIZE
        } else {
            configured.max(MIN_ELEMENT_SIZE)
        }
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    pub fn template(&self) -> Option<&GarmentTemplate> {
        self.template.as_ref()
    }

    /// Choose a garment template. The current document is discarded.
    pub fn set_template(&mut self, template: GarmentTemplate) -> DesignerResult<()> {
        template.validate()?;
        let template_id = template.id.clone();
        self.reset_session();
        if self.garment_size.is_empty() || template.print_area(&self.garment_size).is_none() {
            self.garment_size = template.sizes.keys().next().cloned().unwrap_or_default();
        }
        self.template = Some(template);

        tracing::info!("Template '{}' selected, document reset", template_id);
        self.emit(DesignEvent::TemplateChanged { template_id });
        for side in Side::ALL {
            self.emit(DesignEvent::ElementsChanged { side });
            self.emit_history(side);
        }
        self.emit_selection();
        Ok(())
    }

    /// Empty both sides and every piece of per-document state.
    fn reset_session(&mut self) {
        self.document = DesignDocument::new();
        self.history.reset();
        self.selection.clear();
        self.clipboard.clear();
        self.gesture = GestureState::Idle;
        self.pending_insert = None;
        self.user_uploads.clear();
        self.generated_images.clear();
        self.project_id = None;
        self.is_modified = false;
    }

    pub fn document(&self) -> &DesignDocument {
        &self.document
    }

    pub fn current_side(&self) -> Side {
        self.document.current_side()
    }

    /// Switch the side being edited. Clears the selection.
    pub fn set_side(&mut self, side: Side) -> DesignerResult<()> {
        if let Some(active) = self.gesture.kind() {
            return Err(DesignerError::GestureInProgress { active });
        }
        if side == self.current_side() {
            return Ok(());
        }

        self.document.set_current_side(side);
        self.selection.clear();
        tracing::debug!("Switched to {}", side);
        self.emit(DesignEvent::SideChanged { side });
        self.emit_selection();
        self.emit_history(side);
        Ok(())
    }

    /// Elements of the current side in z-order.
    pub fn elements(&self) -> &[DesignElement] {
        self.document.current().elements()
    }

    pub fn elements_on(&self, side: Side) -> &[DesignElement] {
        self.document.side(side).elements()
    }

    pub fn element(&self, id: &str) -> Option<&DesignElement> {
        self.document.current().get(id)
    }

    pub(crate) fn store(&self) -> &ElementStore {
        self.document.current()
    }

    pub(crate) fn store_mut(&mut self) -> &mut ElementStore {
        self.document.current_mut()
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn selected_elements(&self) -> Vec<&DesignElement> {
        self.selection
            .ids()
            .iter()
            .filter_map(|id| self.element(id))
            .collect()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn design_name(&self) -> &str {
        &self.design_name
    }

    pub fn set_design_name(&mut self, name: impl Into<String>) {
        self.design_name = name.into();
        self.mark_modified();
    }

    pub fn garment_color(&self) -> &str {
        &self.garment_color
    }

    pub fn set_garment_color(&mut self, color: impl Into<String>) {
        self.garment_color = color.into();
        self.mark_modified();
    }

    pub fn garment_size(&self) -> &str {
        &self.garment_size
    }

    /// Select the garment size used for real-world measurements.
    pub fn set_garment_size(&mut self, size: impl Into<String>) {
        let size = size.into();
        if let Some(template) = &self.template {
            if template.print_area(&size).is_none() {
                tracing::warn!(
                    "{}",
                    DesignerError::UnknownSize { size: size.clone() }
                );
            }
        }
        self.garment_size = size;
        self.mark_modified();
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    pub fn user_uploads(&self) -> &[String] {
        &self.user_uploads
    }

    pub fn generated_images(&self) -> &[String] {
        &self.generated_images
    }

    /// Pixel to real-world mapping for the current side and size.
    pub fn coordinate_mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.template.as_ref(), self.current_side(), &self.garment_size)
    }

    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    /// Mark design as modified.
    pub fn mark_modified(&mut self) {
        self.is_modified = true;
    }

    /// Get display name for the design.
    pub fn display_name(&self) -> String {
        if self.is_modified {
            format!("{}*", self.design_name)
        } else {
            self.design_name.clone()
        }
    }

    /// Offer `side`'s list to the history after a mutation and notify observers.
    pub(crate) fn commit(&mut self, side: Side) {
        let elements = self.document.side(side).elements();
        self.history.observe(side, elements);
        self.is_modified = true;
        self.emit(DesignEvent::ElementsChanged { side });
        self.emit_history(side);
    }

    pub(crate) fn emit(&self, event: DesignEvent) {
        tracing::trace!("{}", event.description());
        // Nobody listening is not an error for the engine.
        self.events.publish(event).ok();
    }

    pub(crate) fn emit_history(&self, side: Side) {
        self.emit(DesignEvent::HistoryChanged {
            side,
            can_undo: self.history.can_undo(side),
            can_redo: self.history.can_redo(side),
        });
    }

    pub(crate) fn emit_selection(&self) {
        self.emit(DesignEvent::SelectionChanged {
            side: self.current_side(),
            count: self.selection.count(),
        });
    }

    pub(crate) fn notify_error(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.emit(DesignEvent::error(message));
    }
}

impl Default for DesignerState {
    fn default() -> Self {
        Self::new(DesignerConfig::default())
    }
}
