//! The form controller.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use backdrop_core::color::{describe_color, parse_alpha};
use backdrop_core::form::{self, FormField};
use backdrop_core::{
    BackgroundType, ComposedColor, FormState, ImagePreview, PresetColor, PreviewDisplay, RgbHex,
    SelectedFile,
};
use backdrop_frontend_core::{DomPatch, ElementId, FormSurface};

use crate::error::ControllerError;
use crate::loader::load_preview;

/// Keeps the derived parts of the form in sync with its controls.
///
/// The surface stays the source of truth for control values. The only state
/// held here is the image preview generation and the token of the read in
/// flight.
pub struct FormController<S> {
    surface: Arc<Mutex<S>>,
    preview: Arc<Mutex<ImagePreview>>,
    inflight: Option<CancellationToken>,
}

impl<S> FormController<S>
where
    S: FormSurface + Send + 'static,
{
    pub fn new(surface: S) -> Self {
        Self::with_shared(Arc::new(Mutex::new(surface)))
    }

    /// Drive a surface that is also held elsewhere (e.g. by an IPC bridge
    /// that syncs control values into it).
    pub fn with_shared(surface: Arc<Mutex<S>>) -> Self {
        Self {
            surface,
            preview: Arc::new(Mutex::new(ImagePreview::new())),
            inflight: None,
        }
    }

    pub fn surface(&self) -> &Arc<Mutex<S>> {
        &self.surface
    }

    pub fn preview_display(&self) -> PreviewDisplay {
        self.preview.lock().display().clone()
    }

    // ── Color options ────────────────────────────────────────────

    /// Sync the panel and swatch with the markup defaults. Run once.
    pub fn initialize(&self) -> Result<FormState, ControllerError> {
        let state = self.run(AlphaRead::Ignored, form::initialize)?;
        tracing::info!(
            background_type = state.background_type.token(),
            composed = %state.composed,
            "form initialized"
        );
        Ok(state)
    }

    pub fn toggle_background_options(&self) -> Result<FormState, ControllerError> {
        self.run(AlphaRead::Ignored, form::toggle_background_options)
    }

    pub fn update_color(&self) -> Result<FormState, ControllerError> {
        self.run(AlphaRead::Strict, form::update_color)
    }

    pub fn update_alpha(&self) -> Result<FormState, ControllerError> {
        self.run(AlphaRead::Strict, form::update_alpha)
    }

    pub fn update_color_preview(&self) -> Result<FormState, ControllerError> {
        self.run(AlphaRead::Ignored, form::update_color_preview)
    }

    /// `color` is either `transparent` or a `#RRGGBB` value.
    pub fn select_preset_color(&self, color: &str) -> Result<FormState, ControllerError> {
        let preset = PresetColor::from_token(color);
        let state = self.run(AlphaRead::Ignored, |state| {
            form::select_preset_color(state, &preset)
        })?;
        tracing::debug!(
            preset = color,
            background = %describe_color(state.composed.to_rgba()),
            "preset selected"
        );
        Ok(state)
    }

    /// Read a snapshot, apply `update`, write back what it touched.
    fn run(
        &self,
        alpha: AlphaRead,
        update: impl FnOnce(&mut FormState) -> Vec<FormField>,
    ) -> Result<FormState, ControllerError> {
        let mut surface = self.surface.lock();
        let mut state = read_state(&*surface, alpha)?;
        let touched = update(&mut state);
        write_back(&mut *surface, &state, &touched)?;
        tracing::debug!(composed = %state.composed, ?touched, "form updated");
        Ok(state)
    }

    // ── Image preview ────────────────────────────────────────────

    /// Handle a file-input change.
    ///
    /// Cancels any read still in flight, rebuilds the preview container, and
    /// for image files spawns the read on the current tokio runtime. The
    /// returned handle resolves once the preview source is set (or the read
    /// is abandoned).
    pub fn on_file_change(
        &mut self,
        file: Option<SelectedFile>,
    ) -> Result<Option<JoinHandle<()>>, ControllerError> {
        if let Some(previous) = self.inflight.take() {
            previous.cancel();
        }

        let (ticket, display) = {
            let mut preview = self.preview.lock();
            let ticket = preview.select(file);
            (ticket, preview.display().clone())
        };

        let mut surface = self.surface.lock();
        surface.apply(DomPatch::ClearChildren {
            id: ElementId::ImagePreview,
        })?;

        if let PreviewDisplay::Rejected { message } = display {
            surface.apply(DomPatch::AppendError {
                id: ElementId::ImagePreview,
                message,
            })?;
            return Ok(None);
        }
        let Some(ticket) = ticket else {
            return Ok(None);
        };

        let slot = surface.next_image_slot();
        surface.apply(DomPatch::AppendImage {
            id: ElementId::ImagePreview,
            slot,
        })?;
        drop(surface);

        tracing::debug!(
            name = %ticket.file.name,
            generation = ticket.generation,
            "reading image for preview"
        );

        let cancel = CancellationToken::new();
        self.inflight = Some(cancel.clone());
        let handle = tokio::spawn(load_preview(
            ticket,
            slot,
            cancel,
            Arc::clone(&self.preview),
            Arc::clone(&self.surface),
        ));
        Ok(Some(handle))
    }
}

impl<S> Drop for FormController<S> {
    fn drop(&mut self) {
        if let Some(token) = self.inflight.take() {
            token.cancel();
        }
    }
}

/// How a snapshot treats the alpha slider text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaRead {
    /// The update composes from the slider, so bad text is an error.
    Strict,
    /// The update never reads alpha. Bad text reads as opaque and is not
    /// written back unless the update overwrites it.
    Ignored,
}

/// Snapshot the form controls.
pub fn read_state(
    surface: &impl FormSurface,
    alpha: AlphaRead,
) -> Result<FormState, ControllerError> {
    let background_type = BackgroundType::from_token(&surface.value(ElementId::BackgroundType)?);
    let color_picker = RgbHex::new(surface.value(ElementId::ColorPicker)?);
    let slider = surface.value(ElementId::AlphaSlider)?;
    let alpha = match (parse_alpha(&slider), alpha) {
        (Ok(value), _) => value,
        (Err(e), AlphaRead::Strict) => return Err(e.into()),
        (Err(e), AlphaRead::Ignored) => {
            tracing::debug!("alpha slider not read: {e}");
            u8::MAX
        }
    };
    let composed = ComposedColor::new(surface.value(ElementId::ComposedColor)?);
    Ok(FormState::new(background_type, color_picker, alpha, composed))
}

/// Push the touched fields of `state` to the surface.
pub fn write_back(
    surface: &mut impl FormSurface,
    state: &FormState,
    touched: &[FormField],
) -> Result<(), ControllerError> {
    for field in touched {
        match field {
            FormField::ColorOptionsVisible => surface.apply(DomPatch::SetDisplay {
                id: ElementId::ColorOptions,
                visible: state.color_options_visible,
            })?,
            FormField::ColorPicker => {
                surface.set_value(ElementId::ColorPicker, state.color_picker.as_str())?
            }
            FormField::Alpha => surface.set_value(ElementId::AlphaSlider, state.alpha.to_string())?,
            FormField::AlphaPercent => {
                surface.set_text(ElementId::AlphaLabel, state.alpha_percent.label())?
            }
            FormField::Composed => {
                surface.set_value(ElementId::ComposedColor, state.composed.as_str())?
            }
            FormField::Swatch => {
                surface.apply(DomPatch::SetClass {
                    id: ElementId::ColorPreview,
                    class: state.swatch.class_name().to_string(),
                })?;
                surface.apply(DomPatch::SetBackgroundColor {
                    id: ElementId::ColorPreview,
                    color: state.swatch.background_color().map(str::to_string),
                })?;
            }
        }
    }
    Ok(())
}
