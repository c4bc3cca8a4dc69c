//! Filename sanitization and output path construction for downloads.
//!
//! Media titles become file and folder names, so they are stripped of the
//! characters that common filesystems reject before any path is built.

use std::path::{Component, Path, PathBuf};

/// Extension used for audio-only downloads.
pub const AUDIO_EXTENSION: &str = "mp3";

/// Extension used for progressive video downloads.
pub const VIDEO_EXTENSION: &str = "mp4";

/// Name used when a title sanitizes to nothing.
const UNTITLED: &str = "untitled";

/// Sanitizes a media title for use as a filename or folder name.
///
/// Replaces characters that are invalid on common filesystems:
/// / \ : * ? " < > |
///
/// Control characters are replaced as well. Surrounding whitespace is
/// trimmed, and a name made only of dot segments (`.`, `..`) has its dots
/// rewritten so it can never escape the destination folder.
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() {
        return UNTITLED.to_string();
    }

    if is_safe_filename_segment(&sanitized) {
        sanitized
    } else {
        sanitized
            .chars()
            .map(|c| if c == '.' { '_' } else { c })
            .collect()
    }
}

/// Builds `<folder>/<sanitized-title>.<mp3|mp4>`.
///
/// Without a folder the file lands in the current directory.
#[must_use]
pub fn output_path(folder: Option<&Path>, title: &str, audio_only: bool) -> PathBuf {
    let extension = if audio_only {
        AUDIO_EXTENSION
    } else {
        VIDEO_EXTENSION
    };
    let filename = format!("{}.{extension}", sanitize_filename(title));
    match folder {
        Some(dir) => dir.join(filename),
        None => PathBuf::from(filename),
    }
}

fn is_safe_filename_segment(name: &str) -> bool {
    !Path::new(name).components().any(|component| {
        matches!(
            component,
            Component::CurDir | Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}
