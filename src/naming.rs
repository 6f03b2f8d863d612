//! Centralized filename rules shared by the normalizer, lister and grid builder.
//!
//! Every rule here is a pure function of a filename. The extension is always the
//! last `.`-separated segment, so `photo.final.jpg` has stem `photo.final` and
//! extension `jpg`, while `.jpg` has no extension at all.
//!
//! ## Duplicate suffixes
//!
//! Copying a file in most desktop file managers produces `photo 2.jpg`. The
//! normalizer folds that back into the canonical `photo.jpg`, falling back to
//! `photo-2.jpg` when the canonical name is taken:
//!
//! - `"photo 2.jpg"` → canonical `"photo.jpg"`, alternate `"photo-2.jpg"`
//! - `" photo.jpg "` → canonical `"photo.jpg"`
//! - `"photo 12.jpg"` → unchanged (the `2` must follow whitespace directly)
//!
//! ## Display titles and slugs
//!
//! - `"My Cool Item!!.PNG"` → title `"My Cool Item!!"`, slug `"my-cool-item"`
//! - `"blue_vase--large.jpg"` → title `"Blue Vase Large"`, slug `"blue-vase-large"`

/// Split a filename into `(stem, extension)` on the last dot.
///
/// A leading dot does not start an extension, matching how hidden files are
/// usually treated: `.jpg` has no extension.
pub fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(pos) if pos > 0 && pos + 1 < name.len() => (&name[..pos], Some(&name[pos + 1..])),
        _ => (name, None),
    }
}

/// Filename with its extension removed.
pub fn stem(name: &str) -> &str {
    split_extension(name).0
}

/// Compute the canonical name for a file on disk.
///
/// Trims surrounding whitespace, then removes a whitespace run followed by a
/// single `2` sitting directly before the extension.
pub fn canonical_name(name: &str) -> String {
    let trimmed = name.trim();
    let (stem, ext) = split_extension(trimmed);
    let Some(ext) = ext else {
        return trimmed.to_string();
    };
    match stem.strip_suffix('2') {
        Some(rest) if rest.ends_with(char::is_whitespace) => {
            let base = rest.trim_end_matches(char::is_whitespace);
            if base.is_empty() {
                trimmed.to_string()
            } else {
                format!("{base}.{ext}")
            }
        }
        _ => trimmed.to_string(),
    }
}

/// Insert a `-2` token before the extension (or at the end when there is none).
pub fn alternate_name(name: &str) -> String {
    match split_extension(name) {
        (stem, Some(ext)) => format!("{stem}-2.{ext}"),
        (stem, None) => format!("{stem}-2"),
    }
}

/// If `name` looks like `base-2.ext`, return `base.ext`.
///
/// Used by the lister to spot redundant copies of an existing image.
pub fn dedup_base(name: &str) -> Option<String> {
    let (stem, ext) = split_extension(name);
    let ext = ext?;
    let base = stem.strip_suffix("-2")?;
    Some(format!("{base}.{ext}"))
}

/// Human-readable title for a gallery card.
///
/// Strips the extension, collapses runs of `-`/`_` into a single space and
/// uppercases the first letter of every word. Everything else is preserved.
pub fn display_title(name: &str) -> String {
    let mut spaced = String::with_capacity(name.len());
    let mut in_separator = false;
    for c in stem(name).chars() {
        if c == '-' || c == '_' {
            if !in_separator {
                spaced.push(' ');
            }
            in_separator = true;
        } else {
            spaced.push(c);
            in_separator = false;
        }
    }

    let mut title = String::with_capacity(spaced.len());
    let mut prev_alnum = false;
    for c in spaced.chars() {
        if c.is_alphanumeric() && !prev_alnum {
            title.extend(c.to_uppercase());
        } else {
            title.push(c);
        }
        prev_alnum = c.is_alphanumeric();
    }
    title
}

/// URL-safe slug used to find a card's detail page.
///
/// - Lowercases the stem
/// - Replaces every run of characters outside `[a-z0-9]` with one dash
/// - Strips leading and trailing dashes
pub fn slugify(name: &str) -> String {
    let lower = stem(name).to_lowercase();
    let mut slug = String::with_capacity(lower.len());
    let mut prev_dash = false;
    for c in lower.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }
    slug.trim_matches('-').to_string()
}
