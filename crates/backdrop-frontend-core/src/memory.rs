//! In-memory surface that mirrors element state.
//!
//! Used directly by tests and as the read-side mirror of remote surfaces:
//! control values reported by the page are synced in, and every applied
//! [`DomPatch`] is recorded so callers can inspect or forward it.

use std::collections::HashMap;

use crate::{DomPatch, ElementId, FormSurface, FrontendError, ImageSlot};

/// A child of a preview container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewChild {
    Error(String),
    Image { slot: ImageSlot, src: Option<String> },
}

/// Mirrored state of one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementState {
    pub value: String,
    pub text: String,
    pub visible: bool,
    pub class: String,
    pub background_color: Option<String>,
    pub children: Vec<PreviewChild>,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            value: String::new(),
            text: String::new(),
            visible: true,
            class: String::new(),
            background_color: None,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemorySurface {
    elements: HashMap<ElementId, ElementState>,
    next_slot: u64,
    applied: Vec<DomPatch>,
}

impl MemorySurface {
    /// A surface with no elements. Every read fails until elements are
    /// inserted.
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface carrying every form element with the markup defaults:
    /// no background replacement, opaque white.
    pub fn with_form_defaults() -> Self {
        let mut surface = Self::new();
        for id in ElementId::ALL {
            surface.insert(id);
        }
        surface.sync_value(ElementId::BackgroundType, "transparent");
        surface.sync_value(ElementId::ColorPicker, "#ffffff");
        surface.sync_value(ElementId::AlphaSlider, "255");
        surface.sync_value(ElementId::ComposedColor, "#ffffffff");
        if let Some(label) = surface.elements.get_mut(&ElementId::AlphaLabel) {
            label.text = "100%".to_string();
        }
        surface
    }

    pub fn insert(&mut self, id: ElementId) -> &mut ElementState {
        self.elements.entry(id).or_default()
    }

    /// Mirror a control value reported by the page. Not recorded as a patch.
    pub fn sync_value(&mut self, id: ElementId, value: impl Into<String>) {
        self.insert(id).value = value.into();
    }

    pub fn element(&self, id: ElementId) -> Option<&ElementState> {
        self.elements.get(&id)
    }

    /// Patches applied since the last call.
    pub fn take_applied(&mut self) -> Vec<DomPatch> {
        std::mem::take(&mut self.applied)
    }

    fn element_mut(&mut self, id: ElementId) -> Result<&mut ElementState, FrontendError> {
        self.elements
            .get_mut(&id)
            .ok_or(FrontendError::MissingElement(id))
    }

    fn find_image(&mut self, slot: ImageSlot) -> Option<&mut Option<String>> {
        self.elements
            .values_mut()
            .flat_map(|e| e.children.iter_mut())
            .find_map(|child| match child {
                PreviewChild::Image { slot: s, src } if *s == slot => Some(src),
                _ => None,
            })
    }
}

impl FormSurface for MemorySurface {
    fn value(&self, id: ElementId) -> Result<String, FrontendError> {
        self.element(id)
            .map(|e| e.value.clone())
            .ok_or(FrontendError::MissingElement(id))
    }

    fn text(&self, id: ElementId) -> Result<String, FrontendError> {
        self.element(id)
            .map(|e| e.text.clone())
            .ok_or(FrontendError::MissingElement(id))
    }

    fn apply(&mut self, patch: DomPatch) -> Result<(), FrontendError> {
        match &patch {
            DomPatch::SetValue { id, value } => self.element_mut(*id)?.value = value.clone(),
            DomPatch::SetText { id, text } => self.element_mut(*id)?.text = text.clone(),
            DomPatch::SetDisplay { id, visible } => self.element_mut(*id)?.visible = *visible,
            DomPatch::SetClass { id, class } => self.element_mut(*id)?.class = class.clone(),
            DomPatch::SetBackgroundColor { id, color } => {
                self.element_mut(*id)?.background_color = color.clone();
            }
            DomPatch::ClearChildren { id } => self.element_mut(*id)?.children.clear(),
            DomPatch::AppendError { id, message } => self
                .element_mut(*id)?
                .children
                .push(PreviewChild::Error(message.clone())),
            DomPatch::AppendImage { id, slot } => {
                self.element_mut(*id)?.children.push(PreviewChild::Image {
                    slot: *slot,
                    src: None,
                });
            }
            DomPatch::SetImageSource { slot, src } => match self.find_image(*slot) {
                Some(target) => *target = Some(src.clone()),
                None => tracing::debug!(slot = slot.0, "image slot detached, source dropped"),
            },
        }
        self.applied.push(patch);
        Ok(())
    }

    fn next_image_slot(&mut self) -> ImageSlot {
        self.next_slot += 1;
        ImageSlot(self.next_slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_element_is_an_error() {
        let mut surface = MemorySurface::new();
        assert!(matches!(
            surface.value(ElementId::ColorPicker),
            Err(FrontendError::MissingElement(ElementId::ColorPicker))
        ));
        assert!(surface.set_value(ElementId::ColorPicker, "#fff").is_err());
        assert!(surface.take_applied().is_empty());
    }

    #[test]
    fn test_defaults_and_writes() {
        let mut surface = MemorySurface::with_form_defaults();
        assert_eq!(surface.value(ElementId::AlphaSlider).unwrap(), "255");
        assert_eq!(surface.text(ElementId::AlphaLabel).unwrap(), "100%");

        surface.set_text(ElementId::AlphaLabel, "50%").unwrap();
        assert_eq!(surface.text(ElementId::AlphaLabel).unwrap(), "50%");
        assert_eq!(surface.take_applied().len(), 1);
    }

    #[test]
    fn test_image_source_on_detached_slot_is_ignored() {
        let mut surface = MemorySurface::with_form_defaults();
        let slot = surface.next_image_slot();
        surface
            .apply(DomPatch::AppendImage {
                id: ElementId::ImagePreview,
                slot,
            })
            .unwrap();
        surface
            .apply(DomPatch::ClearChildren {
                id: ElementId::ImagePreview,
            })
            .unwrap();
        surface
            .apply(DomPatch::SetImageSource {
                slot,
                src: "data:,".into(),
            })
            .unwrap();

        let preview = surface.element(ElementId::ImagePreview).unwrap();
        assert!(preview.children.is_empty());
    }

    #[test]
    fn test_slots_are_unique() {
        let mut surface = MemorySurface::new();
        let a = surface.next_image_slot();
        let b = surface.next_image_slot();
        assert_ne!(a, b);
    }
}
