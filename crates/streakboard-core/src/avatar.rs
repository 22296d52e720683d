//! Avatar URLs and upload checks.

use std::path::Path;

use url::Url;

use crate::error::ValidationError;

pub const MAX_AVATAR_BYTES: u64 = 10 * 1024 * 1024;
pub const DICEBEAR_BASE: &str = "https://api.dicebear.com/7.x/adventurer/svg";

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];
const ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png"];

/// Where to load a user's avatar from.
///
/// Uploaded avatars are stored by the backend as server-relative paths
/// (`/api/uploads/<file>`) and are served from the backend origin. Users
/// without one get a generated avatar seeded by their username.
pub fn avatar_url(backend: &Url, username: &str, stored: Option<&str>) -> String {
    match stored.map(str::trim).filter(|s| !s.is_empty()) {
        Some(path) if path.starts_with("http://") || path.starts_with("https://") => {
            path.to_string()
        }
        Some(path) => format!(
            "{}/{}",
            backend.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        ),
        None => format!("{DICEBEAR_BASE}?seed={}", urlencoding::encode(username)),
    }
}

/// MIME type the backend expects for an avatar file, judged by extension.
pub fn content_type_for(path: &Path) -> Option<&'static str> {
    match extension(path)?.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        _ => None,
    }
}

/// Reject files the backend would refuse anyway: only JPG/PNG up to 10 MiB.
///
/// # Errors
///
/// Returns [`ValidationError::Avatar`] describing the first failed check.
pub fn validate_avatar_upload(
    path: &Path,
    content_type: &str,
    size: u64,
) -> Result<(), ValidationError> {
    let ext_ok = extension(path).is_some_and(|e| ALLOWED_EXTENSIONS.contains(&e.as_str()));
    if !ext_ok || !ALLOWED_MIME_TYPES.contains(&content_type) {
        return Err(ValidationError::Avatar(
            "Only JPG and PNG files are allowed".into(),
        ));
    }
    if size > MAX_AVATAR_BYTES {
        return Err(ValidationError::Avatar(
            "File size must be less than 10MB".into(),
        ));
    }
    Ok(())
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> Url {
        Url::parse("https://streaks.example.com/").unwrap()
    }

    #[test]
    fn stored_path_is_served_from_backend() {
        assert_eq!(
            avatar_url(&backend(), "neo", Some("/api/uploads/abc.png")),
            "https://streaks.example.com/api/uploads/abc.png"
        );
    }

    #[test]
    fn absolute_stored_url_passes_through() {
        assert_eq!(
            avatar_url(&backend(), "neo", Some("https://cdn.example.com/a.png")),
            "https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn missing_avatar_uses_seeded_placeholder() {
        assert_eq!(
            avatar_url(&backend(), "john doe&co", None),
            "https://api.dicebear.com/7.x/adventurer/svg?seed=john%20doe%26co"
        );
        assert_eq!(
            avatar_url(&backend(), "neo", Some("  ")),
            avatar_url(&backend(), "neo", None)
        );
    }

    #[test]
    fn upload_accepts_small_png_and_jpeg() {
        assert!(validate_avatar_upload(Path::new("me.PNG"), "image/png", 1024).is_ok());
        assert!(validate_avatar_upload(Path::new("me.jpeg"), "image/jpeg", MAX_AVATAR_BYTES).is_ok());
    }

    #[test]
    fn upload_rejects_wrong_type_or_size() {
        assert!(validate_avatar_upload(Path::new("me.gif"), "image/gif", 10).is_err());
        assert!(validate_avatar_upload(Path::new("me.png"), "text/plain", 10).is_err());
        let too_big = validate_avatar_upload(Path::new("me.png"), "image/png", MAX_AVATAR_BYTES + 1);
        assert_eq!(
            too_big,
            Err(ValidationError::Avatar("File size must be less than 10MB".into()))
        );
    }

    #[test]
    fn content_type_from_extension() {
        assert_eq!(content_type_for(Path::new("a.JPG")), Some("image/jpeg"));
        assert_eq!(content_type_for(Path::new("a.png")), Some("image/png"));
        assert_eq!(content_type_for(Path::new("a.webp")), None);
        assert_eq!(content_type_for(Path::new("noext")), None);
    }
}
