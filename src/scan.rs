//! Image discovery.
//!
//! Lists the eligible images in the photos directory, in the order the grid
//! renders them:
//!
//! 1. **Eligibility**: the extension (case-insensitive) is in the configured
//!    allow-set.
//! 2. **Deduplication**: `base-2.ext` is dropped when `base.ext` is also
//!    eligible. The match is exact string equality after removing `-2`, so
//!    `sunset-view-2.jpg` does not shadow `Sunset View.jpg`.
//! 3. **Ordering**: locale-style collation (see [`collate`]), so `apple.jpg`,
//!    `Banana.jpg` and `cherry.jpg` sort the way a person reads them rather than
//!    uppercase-first.
//!
//! A missing photos directory is not an error; it simply yields no images.

use crate::config::ImagesConfig;
use crate::fs::FileSystem;
use crate::naming;
use crate::types::ImageEntry;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read the photos directory and return its eligible, deduplicated, sorted images.
pub fn list_images(
    fs: &dyn FileSystem,
    dir: &Path,
    images: &ImagesConfig,
) -> Result<Vec<ImageEntry>, ScanError> {
    if !fs.exists(dir) {
        return Ok(Vec::new());
    }
    let names = fs.read_dir(dir)?;
    Ok(select_images(names.as_slice(), images))
}

/// Apply eligibility, deduplication and ordering to a set of directory entry names.
pub fn select_images<S: AsRef<str>>(names: &[S], images: &ImagesConfig) -> Vec<ImageEntry> {
    let eligible: Vec<ImageEntry> = names
        .iter()
        .filter_map(|n| ImageEntry::from_filename(n.as_ref()))
        .filter(|e| images.allows(&e.extension))
        .collect();

    let present: HashSet<&str> = eligible.iter().map(|e| e.filename.as_str()).collect();

    let mut selected: Vec<ImageEntry> = eligible
        .iter()
        .filter(|e| match naming::dedup_base(&e.filename) {
            Some(base) => !present.contains(base.as_str()),
            None => true,
        })
        .cloned()
        .collect();

    selected.sort_by(|a, b| collate(&a.filename, &b.filename));
    selected
}

/// Character class used as the primary sort weight.
///
/// Whitespace sorts before punctuation and symbols, which sort before digits,
/// which sort before letters.
fn char_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_alphabetic() {
        3
    } else if c.is_numeric() {
        2
    } else {
        1
    }
}

fn primary_key(s: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(|c| {
            let class = char_class(c);
            c.to_lowercase().map(move |l| (class, l))
        })
}

fn accent_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

/// Compare two filenames the way a human-facing listing would.
///
/// - Primary: character class, then case-folded character with accents removed
/// - Secondary: accents, unaccented first (`cafe` < `café`)
/// - Tertiary: at the first case difference, lowercase sorts first
/// - Final tie-break: byte order, so distinct names never compare equal
pub fn collate(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| accent_key(a).cmp(accent_key(b)))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}
