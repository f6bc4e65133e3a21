//! Surface backed by the page on the other end of the WebSocket.
//!
//! Control values reported by the page are mirrored locally so reads never
//! round-trip; every write is applied to the mirror and forwarded as a
//! `Patch` message.

use tokio::sync::mpsc;

use backdrop_core::data_url::image_dimensions;
use backdrop_frontend_core::{
    DomPatch, ElementId, FormSurface, FrontendError, ImageSlot, MemorySurface,
};

use crate::ipc::ControllerToUi;

pub struct RemoteSurface {
    mirror: MemorySurface,
    outbound: mpsc::UnboundedSender<ControllerToUi>,
}

impl RemoteSurface {
    pub fn new(outbound: mpsc::UnboundedSender<ControllerToUi>) -> Self {
        Self {
            mirror: MemorySurface::with_form_defaults(),
            outbound,
        }
    }

    /// Mirror a value the page reported. Nothing is sent back.
    pub fn sync_value(&mut self, id: ElementId, value: impl Into<String>) {
        self.mirror.sync_value(id, value);
    }

    pub fn send(&self, msg: ControllerToUi) -> Result<(), FrontendError> {
        self.outbound
            .send(msg)
            .map_err(|e| FrontendError::SendFailed(e.to_string()))
    }
}

impl FormSurface for RemoteSurface {
    fn value(&self, id: ElementId) -> Result<String, FrontendError> {
        self.mirror.value(id)
    }

    fn text(&self, id: ElementId) -> Result<String, FrontendError> {
        self.mirror.text(id)
    }

    fn apply(&mut self, patch: DomPatch) -> Result<(), FrontendError> {
        self.mirror.apply(patch.clone())?;
        self.mirror.take_applied();

        let loaded = match &patch {
            DomPatch::SetImageSource { src, .. } => match image_dimensions(src) {
                Ok(dims) => Some(dims),
                Err(e) => {
                    tracing::warn!("could not read preview dimensions: {e}");
                    None
                }
            },
            _ => None,
        };

        self.send(ControllerToUi::Patch { patch })?;
        if let Some((width, height)) = loaded {
            self.send(ControllerToUi::PreviewLoaded { width, height })?;
        }
        Ok(())
    }

    fn next_image_slot(&mut self) -> ImageSlot {
        self.mirror.next_image_slot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_are_forwarded_and_mirrored() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut surface = RemoteSurface::new(tx);

        surface.set_value(ElementId::ComposedColor, "#11223344").unwrap();
        assert_eq!(surface.value(ElementId::ComposedColor).unwrap(), "#11223344");
        assert_eq!(
            rx.try_recv().unwrap(),
            ControllerToUi::Patch {
                patch: DomPatch::SetValue {
                    id: ElementId::ComposedColor,
                    value: "#11223344".into()
                }
            }
        );
    }

    #[test]
    fn test_synced_values_are_not_echoed() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut surface = RemoteSurface::new(tx);
        surface.sync_value(ElementId::ColorPicker, "#abcdef");
        assert_eq!(surface.value(ElementId::ColorPicker).unwrap(), "#abcdef");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_closed_channel_is_send_failure() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut surface = RemoteSurface::new(tx);
        assert!(matches!(
            surface.set_text(ElementId::AlphaLabel, "1%"),
            Err(FrontendError::SendFailed(_))
        ));
    }
}
