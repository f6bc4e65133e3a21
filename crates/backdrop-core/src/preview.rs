//! Image preview state machine for the file input.
//!
//! ```text
//! Idle ──select(file)──▶ FileChosen ──┬─ not image/* ─▶ Rejected
//!                                     └─ image/*     ─▶ Previewing(gen, None)
//!                                                        │ complete(gen, src)
//!                                                        ▼
//!                                                   Previewing(gen, Some(src))
//! ```
//!
//! Every selection bumps a generation counter. A read completion carrying an
//! older generation is discarded, so a slow read can never overwrite the
//! preview of a newer selection.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Content types accepted for preview start with this prefix.
pub const IMAGE_MIME_PREFIX: &str = "image/";

/// Shown in place of a preview when the chosen file is not an image.
pub const REJECTION_MESSAGE: &str = "Please choose an image file";

/// Content type used when a path carries no recognizable image extension.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// The first file chosen in the file input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    /// Location the bytes are read from.
    pub path: PathBuf,
    /// Display name (file name component of the path).
    pub name: String,
    /// Declared content type, e.g. `image/png`.
    pub content_type: String,
}

impl SelectedFile {
    /// A file whose content type was declared by the host.
    pub fn new(path: impl Into<PathBuf>, content_type: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            name: display_name(&path),
            content_type: content_type.into(),
            path,
        }
    }

    /// A file known only by path; the content type is guessed from the
    /// extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let content_type = guess_content_type(&path);
        Self::new(path, content_type)
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with(IMAGE_MIME_PREFIX)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Guess a content type from the file extension using the `image` crate's
/// format table.
pub fn guess_content_type(path: &Path) -> String {
    image::ImageFormat::from_path(path)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| FALLBACK_CONTENT_TYPE.to_string())
}

/// What the preview container currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreviewDisplay {
    /// Empty container.
    Idle,
    /// Rejection message, no image element.
    Rejected { message: String },
    /// Image element. `loaded_bytes` is the size of the data URL handed to
    /// the surface, `None` until the read completes. The URL itself lives
    /// only on the surface.
    Previewing {
        generation: u64,
        loaded_bytes: Option<usize>,
    },
}

/// Permission to read a file for the preview. Only the ticket for the
/// current generation may complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadTicket {
    pub generation: u64,
    pub file: SelectedFile,
}

/// Preview container state plus the selection generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePreview {
    generation: u64,
    display: PreviewDisplay,
}

impl Default for ImagePreview {
    fn default() -> Self {
        Self {
            generation: 0,
            display: PreviewDisplay::Idle,
        }
    }
}

impl ImagePreview {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn display(&self) -> &PreviewDisplay {
        &self.display
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Handle a file-input change. Returns a ticket when a read should start.
    pub fn select(&mut self, file: Option<SelectedFile>) -> Option<ReadTicket> {
        self.generation = self.generation.wrapping_add(1);
        self.display = PreviewDisplay::Idle;

        let file = file?;
        if !file.is_image() {
            tracing::debug!(
                name = %file.name,
                content_type = %file.content_type,
                "rejecting non-image file"
            );
            self.display = PreviewDisplay::Rejected {
                message: REJECTION_MESSAGE.to_string(),
            };
            return None;
        }

        self.display = PreviewDisplay::Previewing {
            generation: self.generation,
            loaded_bytes: None,
        };
        Some(ReadTicket {
            generation: self.generation,
            file,
        })
    }

    /// Record a finished read. Returns `false` (and changes nothing) when the
    /// read belongs to a superseded selection.
    pub fn complete(&mut self, generation: u64, bytes: usize) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        match &mut self.display {
            PreviewDisplay::Previewing {
                generation: shown,
                loaded_bytes,
            } if *shown == generation => {
                *loaded_bytes = Some(bytes);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(name: &str) -> SelectedFile {
        SelectedFile::new(format!("/tmp/{name}"), "image/png")
    }

    #[test]
    fn test_no_file_stays_idle() {
        let mut preview = ImagePreview::new();
        assert!(preview.select(None).is_none());
        assert_eq!(preview.display(), &PreviewDisplay::Idle);
        assert_eq!(preview.generation(), 1);
    }

    #[test]
    fn test_non_image_is_rejected() {
        let mut preview = ImagePreview::new();
        let file = SelectedFile::new("/tmp/notes.txt", "text/plain");
        assert!(preview.select(Some(file)).is_none());
        assert_eq!(
            preview.display(),
            &PreviewDisplay::Rejected {
                message: REJECTION_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn test_image_previews_after_completion() {
        let mut preview = ImagePreview::new();
        let ticket = preview.select(Some(png("a.png"))).unwrap();
        assert_eq!(
            preview.display(),
            &PreviewDisplay::Previewing {
                generation: ticket.generation,
                loaded_bytes: None
            }
        );

        assert!(preview.complete(ticket.generation, 26));
        assert_eq!(
            preview.display(),
            &PreviewDisplay::Previewing {
                generation: ticket.generation,
                loaded_bytes: Some(26)
            }
        );
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut preview = ImagePreview::new();
        let first = preview.select(Some(png("a.png"))).unwrap();
        let second = preview.select(Some(png("b.png"))).unwrap();
        assert_ne!(first.generation, second.generation);

        assert!(!preview.complete(first.generation, 5));
        assert_eq!(
            preview.display(),
            &PreviewDisplay::Previewing {
                generation: second.generation,
                loaded_bytes: None
            }
        );
    }

    #[test]
    fn test_completion_after_rejection_is_discarded() {
        let mut preview = ImagePreview::new();
        let ticket = preview.select(Some(png("a.png"))).unwrap();
        preview.select(Some(SelectedFile::new("/tmp/a.pdf", "application/pdf")));
        assert!(!preview.complete(ticket.generation, 4));
        assert!(matches!(preview.display(), PreviewDisplay::Rejected { .. }));
    }

    #[test]
    fn test_content_type_guess() {
        assert_eq!(SelectedFile::from_path("/x/photo.PNG").content_type, "image/png");
        assert_eq!(SelectedFile::from_path("/x/photo.jpg").content_type, "image/jpeg");
        assert_eq!(
            SelectedFile::from_path("/x/readme.md").content_type,
            FALLBACK_CONTENT_TYPE
        );
        assert_eq!(SelectedFile::from_path("/x/photo.jpg").name, "photo.jpg");
    }
}
