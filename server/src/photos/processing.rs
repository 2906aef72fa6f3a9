use std::io::Cursor;

use image::{ImageFormat, ImageReader};

/// Allowed image formats for recipe photos.
pub const ALLOWED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

/// Maximum upload size for images (10MB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

pub const THUMBNAIL_SIZE: u32 = 200;

/// An upload that decoded successfully.
#[derive(Debug)]
pub struct ProcessedImage {
    /// Detected content type (e.g., "image/png").
    pub content_type: String,
    /// JPEG thumbnail that fits within `THUMBNAIL_SIZE` pixels.
    pub thumbnail: Vec<u8>,
}

/// Process an image: detect format from magic bytes, validate it's allowed, and generate thumbnail.
///
/// The decoded pixels only live for the duration of this call.
pub fn process_image(data: &[u8]) -> Result<ProcessedImage, String> {
    if data.is_empty() {
        return Err("The submitted file is empty.".to_string());
    }

    if data.len() > MAX_FILE_SIZE {
        return Err(format!(
            "File too large. Maximum size is {} bytes",
            MAX_FILE_SIZE
        ));
    }

    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| format!("Failed to read image: {}", e))?;

    let format = reader.format().ok_or_else(|| {
        "Upload a valid image. The file you uploaded was either not an image or a corrupted image."
            .to_string()
    })?;

    if !ALLOWED_FORMATS.contains(&format) {
        return Err(format!(
            "Unsupported image format: {:?}. Allowed: JPEG, PNG, GIF, WebP",
            format
        ));
    }

    let content_type = format.to_mime_type().to_string();

    let img = reader
        .decode()
        .map_err(|e| format!("Failed to decode image: {}", e))?;

    // thumbnail() preserves aspect ratio, fitting within the given dimensions
    let thumbnail_img = img.thumbnail(THUMBNAIL_SIZE, THUMBNAIL_SIZE).into_rgb8();

    let mut thumbnail_buf = Cursor::new(Vec::new());
    thumbnail_img
        .write_to(&mut thumbnail_buf, ImageFormat::Jpeg)
        .map_err(|e| format!("Failed to encode thumbnail: {}", e))?;

    Ok(ProcessedImage {
        content_type,
        thumbnail: thumbnail_buf.into_inner(),
    })
}
