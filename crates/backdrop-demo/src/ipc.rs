//! IPC message contracts between the controller and the form page.
//!
//! These enums define the complete set of messages exchanged over the
//! WebSocket bridge, serialized as `{"type": ..., "data": ...}`.

use serde::{Deserialize, Serialize};

use backdrop_frontend_core::{DomPatch, ElementId};

/// Messages from the controller to the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ControllerToUi {
    /// Apply one element write.
    Patch {
        /// The write to apply.
        patch: DomPatch,
    },

    /// The preview image source was set.
    PreviewLoaded {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },

    /// Something failed on the controller side.
    Error {
        /// Error description.
        message: String,
    },
}

/// A control value reported by the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlValue {
    pub id: ElementId,
    pub value: String,
}

/// Messages from the page to the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UiToController {
    /// The document finished loading. Carries the markup's initial values.
    Ready {
        /// Current value of every input control.
        values: Vec<ControlValue>,
    },

    /// A control changed without needing a derived update.
    InputChanged {
        /// Element whose value changed.
        id: ElementId,
        /// New value.
        value: String,
    },

    /// The background type selector changed.
    BackgroundTypeChanged {
        /// New selector value.
        value: String,
    },

    /// The color picker changed.
    ColorChanged {
        /// New `#RRGGBB` value.
        value: String,
    },

    /// The alpha slider moved.
    AlphaChanged {
        /// New slider value.
        value: String,
    },

    /// A preset swatch was clicked.
    PresetSelected {
        /// `transparent` or `#RRGGBB`.
        color: String,
    },

    /// A file was chosen by path.
    FileSelected {
        /// Local file path.
        path: String,
        /// Declared content type; guessed from the extension when absent.
        #[serde(default)]
        content_type: Option<String>,
    },

    /// The file selection was cleared.
    FileCleared,

    /// Open the native file dialog.
    BrowseFile,
}
