// src/handlers/upload.rs
// DOCUMENTATION: Uploaded image persistence
// PURPOSE: Move a multipart temp file into the upload directory under a fresh name

use crate::errors::PlacesError;
use actix_multipart::form::tempfile::TempFile;
use std::path::Path;
use uuid::Uuid;

/// Largest accepted image, enforced by the multipart form limits
pub const MAX_IMAGE_BYTES: usize = 500 * 1000;

/// Accepted content types and the extension stored on disk
const IMAGE_TYPES: [(&str, &str); 3] = [
    ("image/png", "png"),
    ("image/jpeg", "jpeg"),
    ("image/jpg", "jpg"),
];

fn extension_for(content_type: Option<&str>) -> Result<&'static str, PlacesError> {
    content_type
        .and_then(|ct| IMAGE_TYPES.iter().find(|(mime, _)| *mime == ct))
        .map(|(_, ext)| *ext)
        .ok_or_else(|| PlacesError::InvalidUpload("Invalid mime type!".to_string()))
}

/// Store an uploaded image and return its relative path
/// DOCUMENTATION: The returned path is what gets persisted on the record and
/// later handed to the cleanup queue
pub async fn store_image(file: TempFile, upload_dir: &str) -> Result<String, PlacesError> {
    let ext = extension_for(file.content_type.as_ref().map(|m| m.essence_str()))?;

    if file.size > MAX_IMAGE_BYTES {
        return Err(PlacesError::InvalidUpload("Image is too large.".to_string()));
    }

    tokio::fs::create_dir_all(upload_dir).await.map_err(|e| {
        log::error!("Cannot create upload directory {}: {}", upload_dir, e);
        PlacesError::Internal(e.to_string())
    })?;

    let target = Path::new(upload_dir).join(format!("{}.{}", Uuid::new_v4(), ext));
    tokio::fs::copy(file.file.path(), &target).await.map_err(|e| {
        log::error!("Failed to store upload at {}: {}", target.display(), e);
        PlacesError::Internal(e.to_string())
    })?;

    log::debug!("Stored upload at {}", target.display());
    Ok(target.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_for_known_types() {
        assert_eq!(extension_for(Some("image/png")).unwrap(), "png");
        assert_eq!(extension_for(Some("image/jpeg")).unwrap(), "jpeg");
        assert_eq!(extension_for(Some("image/jpg")).unwrap(), "jpg");
    }

    #[test]
    fn test_extension_for_rejects_other_types() {
        assert!(matches!(
            extension_for(Some("application/pdf")),
            Err(PlacesError::InvalidUpload(_))
        ));
        assert!(matches!(extension_for(None), Err(PlacesError::InvalidUpload(_))));
    }
}
