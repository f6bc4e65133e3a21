//! User events the controller reacts to.

use tokio::task::JoinHandle;

use backdrop_core::SelectedFile;
use backdrop_frontend_core::FormSurface;

use crate::controller::FormController;
use crate::error::ControllerError;

/// One event fired by the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// The document finished loading.
    Ready,
    /// The background type selector changed.
    BackgroundTypeChanged,
    /// The color picker changed.
    ColorChanged,
    /// The alpha slider moved.
    AlphaChanged,
    /// A preset swatch was clicked. `transparent` or `#RRGGBB`.
    PresetSelected(String),
    /// The file input changed. `None` when the selection was cleared.
    FileChanged(Option<SelectedFile>),
}

impl<S> FormController<S>
where
    S: FormSurface + Send + 'static,
{
    /// Route an event to its entry point.
    ///
    /// Only `FileChanged` for an image yields a handle (the pending read).
    pub fn dispatch(
        &mut self,
        event: FormEvent,
    ) -> Result<Option<JoinHandle<()>>, ControllerError> {
        match event {
            FormEvent::Ready => self.initialize().map(|_| None),
            FormEvent::BackgroundTypeChanged => self.toggle_background_options().map(|_| None),
            FormEvent::ColorChanged => self.update_color().map(|_| None),
            FormEvent::AlphaChanged => self.update_alpha().map(|_| None),
            FormEvent::PresetSelected(color) => self.select_preset_color(&color).map(|_| None),
            FormEvent::FileChanged(file) => self.on_file_change(file),
        }
    }
}
