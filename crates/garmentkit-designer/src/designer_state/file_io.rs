//! Load, save and export operations for designer state.
//!
//! A load replaces the document only after both the record and its template
//! arrived and validated. A save renders both previews, hands the record to
//! the store and keeps the document untouched whatever the outcome; only one
//! save can be in flight at a time.

use chrono::Utc;
use garmentkit_core::{CollaboratorError, DesignEvent, Side};
use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::DesignerState;
use crate::collaborators::{AssetSource, ProjectStore};
use crate::document::DesignDocument;
use crate::error::{DesignerError, DesignerResult};
use crate::model::GarmentTemplate;
use crate::print_spec::{build_print_spec, PrintSpec, PrintSpecInput, PrintSpecOptions};
use crate::renderer;
use crate::serialization::{DesignData, PreviewImages, ProjectRecord};
use crate::transform::GestureState;

/// Clears the in-flight flag when dropped.
#[derive(Debug)]
struct SaveGuard {
    flag: Arc<AtomicBool>,
}

impl SaveGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self {
                flag: Arc::clone(flag),
            })
    }
}

impl Drop for SaveGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// A save ready to hand to the project store.
#[derive(Debug)]
pub struct PreparedSave {
    pub record: ProjectRecord,
    _guard: SaveGuard,
}

/// Lowercase file-name slug; runs of other characters become one dash.
fn slug(name: &str) -> String {
    let mut out = String::new();
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    let trimmed = out.trim_end_matches('-');
    if trimmed.is_empty() {
        "design".to_string()
    } else {
        trimmed.to_string()
    }
}

impl DesignerState {
    /// The current document as a project record, without previews.
    pub fn to_record(&self) -> ProjectRecord {
        ProjectRecord {
            id: self.project_id.clone(),
            name: self.design_name.clone(),
            garment_template_id: self
                .template
                .as_ref()
                .map(|t| t.id.clone())
                .unwrap_or_default(),
            garment_color: self.garment_color.clone(),
            garment_size: self.garment_size.clone(),
            design_data: DesignData {
                front: self.elements_on(Side::Front).to_vec(),
                back: self.elements_on(Side::Back).to_vec(),
                current_side: self.current_side(),
                user_uploads: self.user_uploads.clone(),
                generated_images: self.generated_images.clone(),
            },
            preview_images: None,
        }
    }

    /// Replace the session with a saved record and its template.
    ///
    /// Nothing changes unless the template validates.
    pub fn open_document(&mut self, record: ProjectRecord, template: GarmentTemplate) -> DesignerResult<()> {
        template.validate()?;
        if record.garment_template_id != template.id {
            tracing::warn!(
                "Record references template '{}' but '{}' was supplied",
                record.garment_template_id,
                template.id
            );
        }

        let ProjectRecord {
            id,
            name,
            garment_color,
            garment_size,
            design_data,
            ..
        } = record;

        self.document = DesignDocument::from_sides(
            design_data.front,
            design_data.back,
            design_data.current_side,
        );
        for side in Side::ALL {
            self.history
                .reset_side(side, self.document.side(side).elements().to_vec());
        }
        self.selection.clear();
        self.clipboard.clear();
        self.gesture = GestureState::Idle;
        self.pending_insert = None;
        self.user_uploads = design_data.user_uploads;
        self.generated_images = design_data.generated_images;
        self.project_id = id;
        self.design_name = name;
        self.garment_color = garment_color;
        self.garment_size = garment_size;
        self.is_modified = false;

        let template_id = template.id.clone();
        self.template = Some(template);

        tracing::info!(
            "Loaded '{}' ({} elements)",
            self.design_name,
            self.document.element_count()
        );
        self.emit(DesignEvent::TemplateChanged { template_id });
        self.emit(DesignEvent::DocumentLoaded {
            name: self.design_name.clone(),
        });
        for side in Side::ALL {
            self.emit(DesignEvent::ElementsChanged { side });
            self.emit_history(side);
        }
        self.emit_selection();
        Ok(())
    }

    /// Fetch a project and its template, then install them.
    ///
    /// On any failure the current document stays as it was.
    pub async fn load_project(&mut self, store: &dyn ProjectStore, id: &str) -> DesignerResult<()> {
        let result = async {
            let record = store.load_project(id).await.map_err(DesignerError::Load)?;
            let template = store
                .load_template(&record.garment_template_id)
                .await
                .map_err(DesignerError::Load)?;
            Ok::<_, DesignerError>((record, template))
        }
        .await;

        let loaded = result.and_then(|(record, template)| self.open_document(record, template));
        if let Err(e) = &loaded {
            self.notify_error(format!("Cannot load design '{}': {}", id, e));
        }
        loaded
    }

    /// Whether a save is in flight.
    pub fn is_saving(&self) -> bool {
        self.save_in_flight.load(Ordering::Acquire)
    }

    /// Render previews and build the record to save.
    ///
    /// Returns `Ok(None)` when another save is still in flight; the request is
    /// dropped, not queued.
    pub fn prepare_save(&self) -> DesignerResult<Option<PreparedSave>> {
        let Some(guard) = SaveGuard::acquire(&self.save_in_flight) else {
            tracing::debug!("Save ignored: another save is in flight");
            return Ok(None);
        };
        let template = self.template.as_ref().ok_or(DesignerError::NoTemplate)?;

        let preview = |side: Side| -> DesignerResult<String> {
            let image =
                renderer::render_preview(template, side, self.elements_on(side), &self.garment_color)?;
            renderer::to_data_url(&image)
        };
        let mut record = self.to_record();
        record.preview_images = Some(PreviewImages {
            front: preview(Side::Front)?,
            back: preview(Side::Back)?,
        });

        self.emit(DesignEvent::SaveStarted);
        Ok(Some(PreparedSave {
            record,
            _guard: guard,
        }))
    }

    /// Apply the store's answer to a prepared save. Returns the project id.
    pub fn finish_save(
        &mut self,
        prepared: PreparedSave,
        result: Result<String, CollaboratorError>,
    ) -> DesignerResult<String> {
        drop(prepared);
        match result {
            Ok(id) => {
                tracing::info!("Saved '{}' as {}", self.design_name, id);
                self.project_id = Some(id.clone());
                self.is_modified = false;
                self.emit(DesignEvent::SaveCompleted);
                Ok(id)
            }
            Err(e) => {
                self.emit(DesignEvent::SaveFailed {
                    reason: e.to_string(),
                });
                self.notify_error(format!("Could not save '{}': {}", self.design_name, e));
                Err(DesignerError::Save(e))
            }
        }
    }

    /// Save through the project store. Returns `false` if a save was already running.
    pub async fn save(&mut self, store: &dyn ProjectStore) -> DesignerResult<bool> {
        let Some(prepared) = self.prepare_save()? else {
            return Ok(false);
        };
        let result = store.save_project(&prepared.record).await;
        self.finish_save(prepared, result)?;
        Ok(true)
    }

    /// Print specification for both sides in real-world units.
    pub fn print_spec(&self) -> PrintSpec {
        let options = PrintSpecOptions {
            font_pt_factor: self.config.export.font_pt_factor,
            image_placeholder: self.config.export.image_placeholder.clone(),
        };
        let input = PrintSpecInput {
            name: &self.design_name,
            template: self.template.as_ref(),
            garment_template_id: self.template.as_ref().map(|t| t.id.as_str()).unwrap_or(""),
            garment_color: &self.garment_color,
            garment_size: &self.garment_size,
            front: self.elements_on(Side::Front),
            back: self.elements_on(Side::Back),
        };
        build_print_spec(input, &options)
    }

    /// Write the print specification, stamped with the export time; the
    /// path gets a `.json` extension.
    pub fn export_print_spec(&self, path: impl AsRef<Path>) -> anyhow::Result<PathBuf> {
        let spec = PrintSpec {
            generated_at: Some(Utc::now()),
            ..self.print_spec()
        };
        spec.save_to_file(path)
    }

    pub fn render_preview(&self, side: Side) -> DesignerResult<RgbaImage> {
        let template = self.template.as_ref().ok_or(DesignerError::NoTemplate)?;
        renderer::render_preview(template, side, self.elements_on(side), &self.garment_color)
    }

    /// Full-fidelity raster of one side for download.
    pub async fn render_export(&self, side: Side, assets: &dyn AssetSource) -> DesignerResult<RgbaImage> {
        let template = self.template.as_ref().ok_or(DesignerError::NoTemplate)?;
        renderer::render_export(
            template,
            side,
            self.elements_on(side),
            &self.garment_color,
            self.config.export.supersample,
            assets,
        )
        .await
    }

    /// File name for a rendered download: `<name>-<side>-<size>.png`.
    pub fn download_file_name(&self, side: Side) -> String {
        let name = slug(&self.design_name);
        if self.garment_size.trim().is_empty() {
            format!("{}-{}.png", name, side)
        } else {
            format!("{}-{}-{}.png", name, side, slug(&self.garment_size))
        }
    }

    /// Save the project record to disk.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        self.to_record().save_to_file(path)?;
        self.is_modified = false;
        Ok(())
    }

    /// Load a project record from disk with its template.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>, template: GarmentTemplate) -> anyhow::Result<()> {
        let record = ProjectRecord::load_from_file(path)?;
        self.open_document(record, template)?;
        Ok(())
    }
}
