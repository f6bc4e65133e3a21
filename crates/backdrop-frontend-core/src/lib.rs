//! Frontend core abstractions for Backdrop.
//!
//! Defines the [`FormSurface`] trait that abstracts over whatever presents the
//! form (a browser page over IPC, an in-memory mirror in tests). Element
//! identifiers and element writes are defined here so the surface does not
//! depend on domain types from `backdrop-core`.

mod memory;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use memory::{ElementState, MemorySurface, PreviewChild};

// ── Elements ─────────────────────────────────────────────────────

/// Elements the form markup must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementId {
    #[serde(rename = "bg_type")]
    BackgroundType,
    #[serde(rename = "color-options")]
    ColorOptions,
    #[serde(rename = "color_picker")]
    ColorPicker,
    #[serde(rename = "alpha_slider")]
    AlphaSlider,
    #[serde(rename = "alpha_value")]
    AlphaLabel,
    #[serde(rename = "bg_color")]
    ComposedColor,
    #[serde(rename = "color_preview")]
    ColorPreview,
    #[serde(rename = "file")]
    FileInput,
    #[serde(rename = "image-preview")]
    ImagePreview,
}

impl ElementId {
    pub const ALL: [ElementId; 9] = [
        ElementId::BackgroundType,
        ElementId::ColorOptions,
        ElementId::ColorPicker,
        ElementId::AlphaSlider,
        ElementId::AlphaLabel,
        ElementId::ComposedColor,
        ElementId::ColorPreview,
        ElementId::FileInput,
        ElementId::ImagePreview,
    ];

    /// The `id` attribute in the markup.
    pub const fn dom_id(self) -> &'static str {
        match self {
            Self::BackgroundType => "bg_type",
            Self::ColorOptions => "color-options",
            Self::ColorPicker => "color_picker",
            Self::AlphaSlider => "alpha_slider",
            Self::AlphaLabel => "alpha_value",
            Self::ComposedColor => "bg_color",
            Self::ColorPreview => "color_preview",
            Self::FileInput => "file",
            Self::ImagePreview => "image-preview",
        }
    }

    pub fn from_dom_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.dom_id() == id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dom_id())
    }
}

/// Handle to an image element appended to a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageSlot(pub u64);

// ── Errors ───────────────────────────────────────────────────────

/// Errors that can occur in frontend operations.
#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
    #[error("element #{0} is missing")]
    MissingElement(ElementId),

    #[error("failed to send message to UI: {0}")]
    SendFailed(String),

    #[error("backend error: {0}")]
    Backend(String),
}

// ── Writes ───────────────────────────────────────────────────────

/// A single write to the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DomPatch {
    /// Set an input's `value`.
    SetValue { id: ElementId, value: String },
    /// Set an element's `textContent`.
    SetText { id: ElementId, text: String },
    /// `display: block` when visible, `display: none` otherwise.
    SetDisplay { id: ElementId, visible: bool },
    /// Replace `className`.
    SetClass { id: ElementId, class: String },
    /// Set the inline background color, or clear it with `None`.
    SetBackgroundColor { id: ElementId, color: Option<String> },
    /// Remove all children.
    ClearChildren { id: ElementId },
    /// Append `<p class="error">message</p>`.
    AppendError { id: ElementId, message: String },
    /// Append an empty `<img>` addressed by `slot`.
    AppendImage { id: ElementId, slot: ImageSlot },
    /// Set an appended image's `src`. A detached slot is ignored.
    SetImageSource { slot: ImageSlot, src: String },
}

// ── Surface trait ────────────────────────────────────────────────

/// Trait for anything that presents the form.
///
/// Reads return the current control values; writes are expressed as
/// [`DomPatch`]es so remote surfaces can forward them unchanged.
pub trait FormSurface {
    /// Current `value` of an input element.
    fn value(&self, id: ElementId) -> Result<String, FrontendError>;

    /// Current `textContent` of an element.
    fn text(&self, id: ElementId) -> Result<String, FrontendError>;

    /// Apply one write.
    fn apply(&mut self, patch: DomPatch) -> Result<(), FrontendError>;

    /// Allocate a fresh image slot for [`DomPatch::AppendImage`].
    fn next_image_slot(&mut self) -> ImageSlot;

    fn set_value(&mut self, id: ElementId, value: impl Into<String>) -> Result<(), FrontendError>
    where
        Self: Sized,
    {
        self.apply(DomPatch::SetValue {
            id,
            value: value.into(),
        })
    }

    fn set_text(&mut self, id: ElementId, text: impl Into<String>) -> Result<(), FrontendError>
    where
        Self: Sized,
    {
        self.apply(DomPatch::SetText {
            id,
            text: text.into(),
        })
    }
}
