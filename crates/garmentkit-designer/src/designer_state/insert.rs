//! Two-phase image insertion: `begin_insert → decode → commit_insert`.
//!
//! An image or sticker can only be placed once its natural size is known, so
//! insertion is split around the decode. Each `begin_insert` supersedes the
//! previous pending insertion; a ticket that is no longer pending commits
//! nothing.

use garmentkit_core::Side;

use super::DesignerState;
use crate::collaborators::{AssetSource, UploadService};
use crate::error::{DesignerError, DesignerResult};
use crate::model::{DesignElement, ElementKind};
use crate::renderer::image_dimensions;

/// Handle for one pending insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InsertTicket(u64);

#[derive(Debug, Clone)]
pub(super) struct PendingInsert {
    ticket: InsertTicket,
    reference: String,
    kind: ElementKind,
    side: Side,
}

/// Scale `(width, height)` so the longer edge equals `max_size`.
fn fit_within(width: f64, height: f64, max_size: f64) -> (f64, f64) {
    let longest = width.max(height);
    if longest <= 0.0 || !longest.is_finite() {
        return (max_size, max_size);
    }
    let scale = max_size / longest;
    (width * scale, height * scale)
}

impl DesignerState {
    /// Announce an insertion whose dimensions are not known yet.
    pub fn begin_insert(&mut self, reference: impl Into<String>, kind: ElementKind) -> InsertTicket {
        if let Some(previous) = self.pending_insert.take() {
            tracing::debug!("Insertion of '{}' superseded", previous.reference);
        }

        self.next_insert_ticket += 1;
        let ticket = InsertTicket(self.next_insert_ticket);
        self.pending_insert = Some(PendingInsert {
            ticket,
            reference: reference.into(),
            kind,
            side: self.current_side(),
        });
        ticket
    }

    /// Reference of the insertion waiting for its dimensions, if any.
    pub fn pending_insert(&self) -> Option<&str> {
        self.pending_insert.as_ref().map(|p| p.reference.as_str())
    }

    /// Place the pending element once its natural size is known.
    pub fn commit_insert(&mut self, ticket: InsertTicket, natural_width: u32, natural_height: u32) -> DesignerResult<String> {
        let pending = self.take_pending(ticket)?;
        let (width, height) = fit_within(
            natural_width as f64,
            natural_height as f64,
            self.config.geometry.image_insert_max_size,
        );
        let (x, y) = self.centered_position(pending.side, width, height);

        let element = DesignElement::new(pending.kind, pending.reference, x, y, width, height);
        self.add_element_to(pending.side, element)
    }

    /// Abort the pending insertion after a failed decode or upload.
    pub fn fail_insert(&mut self, ticket: InsertTicket, reason: &str) {
        if let Ok(pending) = self.take_pending(ticket) {
            self.notify_error(format!("Could not add '{}': {}", pending.reference, reason));
        }
    }

    /// Drop the pending insertion, if any. Returns whether one was pending.
    pub fn cancel_insert(&mut self) -> bool {
        match self.pending_insert.take() {
            Some(pending) => {
                tracing::debug!("Insertion of '{}' cancelled", pending.reference);
                true
            }
            None => false,
        }
    }

    fn take_pending(&mut self, ticket: InsertTicket) -> DesignerResult<PendingInsert> {
        let pending = self
            .pending_insert
            .take()
            .ok_or(DesignerError::NoPendingInsert)?;
        if pending.ticket != ticket {
            self.pending_insert = Some(pending);
            return Err(DesignerError::InsertCancelled);
        }
        Ok(pending)
    }

    /// Decode `bytes` for the pending insertion and commit or fail it.
    pub(crate) fn finish_insert_with_bytes(&mut self, ticket: InsertTicket, bytes: &[u8]) -> DesignerResult<String> {
        match image_dimensions(bytes) {
            Ok((width, height)) => self.commit_insert(ticket, width, height),
            Err(e) => {
                self.fail_insert(ticket, &e.to_string());
                Err(e)
            }
        }
    }

    /// Upload raw image bytes, then insert the uploaded image.
    ///
    /// An upload failure adds nothing and leaves any earlier pending insertion alone.
    pub async fn upload_and_insert(
        &mut self,
        upload: &dyn UploadService,
        bytes: &[u8],
        file_name: &str,
    ) -> DesignerResult<String> {
        let reference = match upload.upload(bytes, file_name).await {
            Ok(reference) => reference,
            Err(e) => {
                self.notify_error(format!("Upload of '{}' failed: {}", file_name, e));
                return Err(DesignerError::Upload(e));
            }
        };

        tracing::info!("Uploaded '{}' as {}", file_name, reference);
        if !self.user_uploads.contains(&reference) {
            self.user_uploads.push(reference.clone());
        }

        let ticket = self.begin_insert(reference, ElementKind::Image);
        self.finish_insert_with_bytes(ticket, bytes)
    }

    /// Insert an asset that already has a reference, such as a sticker.
    pub async fn insert_from_source(
        &mut self,
        assets: &dyn AssetSource,
        reference: &str,
        kind: ElementKind,
    ) -> DesignerResult<String> {
        let ticket = self.begin_insert(reference, kind);
        match assets.fetch(reference).await {
            Ok(bytes) => self.finish_insert_with_bytes(ticket, &bytes),
            Err(e) => {
                self.fail_insert(ticket, &e.to_string());
                Err(DesignerError::Decode {
                    reason: format!("fetch of '{}' failed: {}", reference, e),
                })
            }
        }
    }
}
