use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use exif::{In, Reader, Tag, Value};
use raylib::prelude::*;
use tracing::{debug, warn};

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

// --- Helper: Load and Sort Image Paths ---
pub fn load_sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    let entries = fs::read_dir(dir_path)
        .with_context(|| format!("Failed to read directory {}", dir_path.display()))?;

    for entry in entries {
        let path = entry.context("Failed to read directory entry")?.path();
        if path.is_file() && is_image(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    if paths.is_empty() {
        bail!("No image files found in directory: {}", dir_path.display());
    }
    Ok(paths)
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// EXIF orientation tag of a JPEG, 1 (upright) when absent.
fn exif_orientation(bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => match exif.get_field(Tag::Orientation, In::PRIMARY).map(|f| &f.value) {
            Some(Value::Short(values)) if !values.is_empty() => values[0],
            _ => 1,
        },
        Err(e) => {
            // Non-critical: show the image unrotated
            debug!("no EXIF data: {}", e);
            1
        }
    }
}

/// Clockwise quarter turns for an EXIF orientation. Flipped orientations
/// (2, 4, 5, 7) are ignored.
fn quarter_turns(orientation: u16) -> u8 {
    match orientation {
        3 => 2,
        6 => 1,
        8 => 3,
        _ => 0,
    }
}

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D> {
    let file_bytes = fs::read(image_path)
        .with_context(|| format!("Failed to read file {}", image_path.display()))?;

    let extension = image_path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();
    let orientation = if extension == "jpg" || extension == "jpeg" { exif_orientation(&file_bytes) } else { 1 };

    let mut image = Image::load_image_from_mem(&format!(".{}", extension), &file_bytes)
        .map_err(|e| anyhow!("Failed to decode image {}: {}", image_path.display(), e))?;

    match quarter_turns(orientation) {
        1 => image.rotate_cw(),
        2 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        3 => image.rotate_ccw(),
        _ => {}
    }

    let texture = rl.load_texture_from_image(thread, &image)
        .map_err(|e| anyhow!("Failed to create texture for {}: {}", image_path.display(), e))?;

    Ok(texture)
}

/// Loads every image it can; unreadable files are logged and skipped.
pub fn load_textures(rl: &mut RaylibHandle, thread: &RaylibThread, paths: &[PathBuf]) -> Vec<Texture2D> {
    let mut textures = Vec::with_capacity(paths.len());
    for path in paths {
        match load_texture_with_exif_rotation(rl, thread, path) {
            Ok(texture) => textures.push(texture),
            Err(e) => warn!("Skipping image: {:#}", e),
        }
    }
    textures
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_to_rotation() {
        assert_eq!(quarter_turns(1), 0);
        assert_eq!(quarter_turns(3), 2);
        assert_eq!(quarter_turns(6), 1);
        assert_eq!(quarter_turns(8), 3);
        assert_eq!(quarter_turns(5), 0);
    }

    #[test]
    fn garbage_has_no_orientation() {
        assert_eq!(exif_orientation(b"not a jpeg"), 1);
    }

    #[test]
    fn image_extensions_are_case_insensitive() {
        assert!(is_image(Path::new("shot.PNG")));
        assert!(is_image(Path::new("a/b/photo.jpeg")));
        assert!(!is_image(Path::new("notes.txt")));
        assert!(!is_image(Path::new("README")));
    }

    #[test]
    fn missing_directory_is_an_error() {
        assert!(load_sorted_image_paths(Path::new("/definitely/not/here")).is_err());
    }
}
