//! Image uploads
//!
//! Accepts one image per request in the multipart field `file`. Only PNG,
//! JPEG, WebP and GIF are accepted, judged by file extension and, when the
//! client sends one, by content type. Files are stored as `<uuid>.<ext>`
//! in the upload directory.

use axum::extract::Multipart;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::AppError;

/// Name of the multipart field carrying the image
pub const FILE_FIELD: &str = "file";

/// Accepted formats: uploaded extension, stored extension, content type
const IMAGE_FORMATS: &[(&str, &str, &str)] = &[
    ("png", "png", "image/png"),
    ("jpg", "jpg", "image/jpeg"),
    ("jpeg", "jpg", "image/jpeg"),
    ("webp", "webp", "image/webp"),
    ("gif", "gif", "image/gif"),
];

/// A validated image waiting to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Normalized extension (`jpeg` becomes `jpg`)
    pub extension: &'static str,
    pub bytes: Vec<u8>,
}

/// Resolve the stored extension of an upload, `None` if it is not an image
/// we accept
pub fn image_extension(file_name: &str, content_type: Option<&str>) -> Option<&'static str> {
    let ext = Path::new(file_name)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();
    let (_, stored, mime) = IMAGE_FORMATS.iter().find(|(known, _, _)| *known == ext)?;

    if let Some(content_type) = content_type {
        let essence = content_type.split(';').next().unwrap_or_default().trim();
        if !essence.eq_ignore_ascii_case(mime) && essence != "application/octet-stream" {
            return None;
        }
    }

    Some(*stored)
}

/// Pull the `file` field out of a multipart body
pub async fn read_image(mut multipart: Multipart, max_bytes: usize) -> Result<ImageUpload, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let Some(extension) = image_extension(&file_name, content_type.as_deref()) else {
            return Err(AppError::validation(format!(
                "'{file_name}' is not an accepted image (png, jpeg, webp, gif)"
            )));
        };

        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            return Err(AppError::validation("uploaded file is empty"));
        }
        if bytes.len() > max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "{} bytes exceeds the limit of {max_bytes} bytes",
                bytes.len()
            )));
        }

        return Ok(ImageUpload {
            extension,
            bytes: bytes.to_vec(),
        });
    }

    Err(AppError::bad_request(format!("missing multipart field '{FILE_FIELD}'")))
}

/// Write an upload into `dir`, returning the stored file name
pub async fn store_image(dir: &Path, upload: &ImageUpload) -> Result<String, AppError> {
    tokio::fs::create_dir_all(dir).await?;

    let file_name = format!("{}.{}", Uuid::new_v4(), upload.extension);
    let path: PathBuf = dir.join(&file_name);
    tokio::fs::write(&path, &upload.bytes).await?;

    tracing::info!(path = %path.display(), bytes = upload.bytes.len(), "image stored");
    Ok(file_name)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_image_extension() {
        assert_eq!(image_extension("hero.PNG", None), Some("png"));
        assert_eq!(image_extension("photo.jpeg", Some("image/jpeg")), Some("jpg"));
        assert_eq!(image_extension("photo.jpg", Some("image/jpeg")), Some("jpg"));
        assert_eq!(image_extension("anim.gif", Some("image/gif")), Some("gif"));
        assert_eq!(image_extension("x.webp", Some("application/octet-stream")), Some("webp"));
    }

    #[test]
    fn test_rejected_uploads() {
        assert_eq!(image_extension("notes.txt", None), None);
        assert_eq!(image_extension("no-extension", None), None);
        // extension and content type must agree
        assert_eq!(image_extension("fake.png", Some("text/html")), None);
        assert_eq!(image_extension("fake.png", Some("image/gif")), None);
    }

    #[tokio::test]
    async fn test_store_image() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("uploads");
        let upload = ImageUpload {
            extension: "png",
            bytes: vec![0x89, b'P', b'N', b'G'],
        };

        let name = store_image(&dir, &upload).await.unwrap();
        assert!(name.ends_with(".png"));
        assert_eq!(std::fs::read(dir.join(&name)).unwrap(), upload.bytes);
    }
}
