//! `data:` URL encoding for image previews.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::DataUrlError;

const BASE64_MARKER: &str = ";base64,";

/// Encode bytes as `data:<mime>;base64,<payload>`.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime}{BASE64_MARKER}{}", STANDARD.encode(bytes))
}

/// Decode a base64 data URL, or a bare base64 payload.
///
/// Returns the declared MIME type (if any) and the decoded bytes.
pub fn decode_data_url(input: &str) -> Result<(Option<String>, Vec<u8>), DataUrlError> {
    let (mime, payload) = match input.split_once(BASE64_MARKER) {
        Some((head, payload)) => {
            let mime = head
                .strip_prefix("data:")
                .filter(|m| !m.is_empty())
                .map(str::to_string);
            (mime, payload)
        }
        None => (None, input),
    };
    Ok((mime, STANDARD.decode(payload.trim())?))
}

/// Decode an image carried in a data URL.
pub fn decode_image(input: &str) -> Result<image::DynamicImage, DataUrlError> {
    let (_, bytes) = decode_data_url(input)?;
    Ok(image::load_from_memory(&bytes)?)
}

/// Width and height of an image carried in a data URL, read from its header.
pub fn image_dimensions(input: &str) -> Result<(u32, u32), DataUrlError> {
    let (_, bytes) = decode_data_url(input)?;
    let reader = image::ImageReader::new(std::io::Cursor::new(bytes))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)?;
    Ok(reader.into_dimensions()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(encode_data_url("image/png", b"hi"), "data:image/png;base64,aGk=");
        assert_eq!(encode_data_url("image/gif", b""), "data:image/gif;base64,");
    }

    #[test]
    fn test_decode_full_and_bare() {
        let (mime, bytes) = decode_data_url("data:image/png;base64,aGk=").unwrap();
        assert_eq!(mime.as_deref(), Some("image/png"));
        assert_eq!(bytes, b"hi");

        let (mime, bytes) = decode_data_url("aGk=").unwrap();
        assert_eq!(mime, None);
        assert_eq!(bytes, b"hi");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_data_url("data:image/png;base64,@@@"),
            Err(DataUrlError::Base64(_))
        ));
    }

    #[test]
    fn test_decode_image() {
        let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([255, 0, 0, 255]));
        let mut png = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let url = encode_data_url("image/png", &png);
        let decoded = decode_image(&url).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (3, 2));
        assert_eq!(image_dimensions(&url).unwrap(), (3, 2));

        assert!(matches!(
            decode_image(&encode_data_url("image/png", b"not a png")),
            Err(DataUrlError::Image(_))
        ));
    }
}
