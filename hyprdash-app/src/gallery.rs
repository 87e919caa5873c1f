//! Picture-directory scan feeding the `view_image` action.

use std::io;
use std::path::Path;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

pub fn is_image(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}

/// Sorted names of the image files directly inside `dir`.
pub fn list_images(dir: &Path) -> io::Result<Vec<String>> {
    let mut images = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let Ok(entry) = entry else {
            continue;
        };
        // Follows symlinks; dangling links are skipped.
        match std::fs::metadata(entry.path()) {
            Ok(meta) if meta.is_file() => {}
            _ => continue,
        }
        // Names that are not valid UTF-8 cannot be passed through the menu.
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if is_image(&name) {
            images.push(name);
        }
    }
    images.sort();
    Ok(images)
}
