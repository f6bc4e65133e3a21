//! Native file dialog for the image input.

use std::path::PathBuf;

/// Extensions offered by the dialog filter. Other files can still be picked
/// through the "All files" filter and are rejected by the preview.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp", "tif", "tiff"];

/// Ask the user for one file. `None` when the dialog was dismissed.
pub async fn pick_image() -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title("Choose an image")
        .add_filter("Images", IMAGE_EXTENSIONS)
        .add_filter("All files", &["*"])
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}
