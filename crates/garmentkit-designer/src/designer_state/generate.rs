//! Image generation for designer state.
//!
//! Generation is slow and cancellable: the caller owns a `watch` channel and
//! flips it to `true` when the user dismisses the dialog. Candidates are not
//! kept anywhere until one is picked.

use tokio::sync::watch;

use super::DesignerState;
use crate::collaborators::{AssetSource, ImageGenerator};
use crate::error::{DesignerError, DesignerResult};
use crate::model::ElementKind;

/// Resolves once `cancel` holds `true`; never resolves if the sender is gone.
async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    loop {
        if *cancel.borrow_and_update() {
            return;
        }
        if cancel.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

impl DesignerState {
    /// Ask the generator for candidates. `Ok(None)` means the user cancelled.
    pub async fn generate_images(
        &self,
        generator: &dyn ImageGenerator,
        prompt: &str,
        mut cancel: watch::Receiver<bool>,
    ) -> DesignerResult<Option<Vec<String>>> {
        tracing::info!("Generating images for '{}'", prompt);

        tokio::select! {
            biased;
            _ = cancelled(&mut cancel) => {
                tracing::info!("Image generation cancelled");
                Ok(None)
            }
            result = generator.generate(prompt) => match result {
                Ok(candidates) => {
                    tracing::info!("Generated {} candidate(s)", candidates.len());
                    Ok(Some(candidates))
                }
                Err(e) => {
                    self.notify_error(format!("Image generation failed: {}", e));
                    Err(DesignerError::Generate(e))
                }
            },
        }
    }

    /// Keep the chosen candidate and insert it on the current side.
    pub async fn pick_generated(&mut self, assets: &dyn AssetSource, reference: &str) -> DesignerResult<String> {
        if !self.generated_images.iter().any(|r| r == reference) {
            self.generated_images.push(reference.to_string());
        }
        self.insert_from_source(assets, reference, ElementKind::Image)
            .await
    }
}
