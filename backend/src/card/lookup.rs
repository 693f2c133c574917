//! Maps display names to normalized file keys and finds matching photos
//! inside the uploaded archive.

use std::io::{Read, Seek};

use zip::ZipArchive;

/// Extensions tried when resolving a photo, in preference order.
const PHOTO_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png"];

/// Lowercase, collapse internal whitespace, spaces to underscores. Used as
/// the photo lookup key and as the output filename stem.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Find the photo for `name` in the archive: case-insensitive suffix match of
/// `<normalized>.<ext>` over entry names, extensions in fixed order, first
/// match wins. No match is `None`, not an error.
pub fn find_photo_in_zip<R: Read + Seek>(
    name: &str,
    archive: &mut ZipArchive<R>,
) -> Option<Vec<u8>> {
    let normalized = normalize_name(name);
    let entries: Vec<String> = archive.file_names().map(str::to_string).collect();

    for ext in PHOTO_EXTENSIONS {
        let needle = format!("{normalized}{ext}");
        let Some(entry) = entries.iter().find(|n| n.to_lowercase().ends_with(&needle)) else {
            continue;
        };
        let mut file = archive.by_name(entry).ok()?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).ok()?;
        return Some(bytes);
    }
    None
}
