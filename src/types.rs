//! Shared types passed between pipeline stages.

use crate::naming;
use serde::Serialize;

/// An eligible image in the photos directory.
///
/// Identity is the filename on disk. The extension is kept as written, so
/// `Photo.JPG` has extension `JPG`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageEntry {
    pub filename: String,
    pub extension: String,
}

impl ImageEntry {
    /// Build an entry from a filename. Returns `None` when there is no extension.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = naming::split_extension(filename);
        ext.map(|ext| Self {
            filename: filename.to_string(),
            extension: ext.to_string(),
        })
    }

    /// Display title used for the caption and `alt` text.
    pub fn title(&self) -> String {
        naming::display_title(&self.filename)
    }

    /// Slug used to look up the card's detail page.
    pub fn slug(&self) -> String {
        naming::slugify(&self.filename)
    }
}
