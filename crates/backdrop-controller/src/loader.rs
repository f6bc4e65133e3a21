//! Asynchronous file read behind the image preview.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use backdrop_core::data_url::encode_data_url;
use backdrop_core::{ImagePreview, ReadTicket, SelectedFile};
use backdrop_frontend_core::{DomPatch, FormSurface, ImageSlot};

use crate::error::PreviewLoadError;

/// Read a file and encode it as a data URL with its declared content type.
pub async fn read_data_url(file: &SelectedFile) -> Result<String, PreviewLoadError> {
    let bytes = tokio::fs::read(&file.path).await?;
    Ok(encode_data_url(&file.content_type, &bytes))
}

/// Read the ticket's file and, if the selection is still current, point the
/// image slot at it.
pub(crate) async fn load_preview<S>(
    ticket: ReadTicket,
    slot: ImageSlot,
    cancel: CancellationToken,
    preview: Arc<Mutex<ImagePreview>>,
    surface: Arc<Mutex<S>>,
) where
    S: FormSurface + Send + 'static,
{
    let result = tokio::select! {
        _ = cancel.cancelled() => Err(PreviewLoadError::Cancelled),
        read = read_data_url(&ticket.file) => read,
    };

    let src = match result {
        Ok(src) => src,
        Err(PreviewLoadError::Cancelled) => {
            tracing::debug!(generation = ticket.generation, "preview read cancelled");
            return;
        }
        Err(e) => {
            tracing::warn!(
                path = %ticket.file.path.display(),
                "failed to read preview image: {e}"
            );
            return;
        }
    };

    let bytes = src.len();
    if !preview.lock().complete(ticket.generation, bytes) {
        tracing::debug!(generation = ticket.generation, "discarding stale preview read");
        return;
    }

    if let Err(e) = surface.lock().apply(DomPatch::SetImageSource { slot, src }) {
        tracing::warn!("failed to show preview image: {e}");
        return;
    }
    tracing::info!(name = %ticket.file.name, bytes, "image preview ready");
}
