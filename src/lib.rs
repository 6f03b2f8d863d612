//! # grid-inject
//!
//! Keeps the image gallery of a hand-authored static page in sync with a
//! directory of photos. Drop images into `public/etsy_photos/`, run the tool,
//! and the grid between the marker comments in `index.html` is regenerated.
//!
//! # Architecture: One Linear Pass
//!
//! ```text
//! 1. Normalize  public/etsy_photos/  →  canonical filenames   ("photo 2.jpg" → "photo.jpg")
//! 2. List       public/etsy_photos/  →  ordered image entries (filtered, deduplicated)
//! 3. Generate   entries              →  grid fragment         (maud)
//! 4. Inject     fragment + index.html →  index.html           (between markers)
//! ```
//!
//! Every stage takes its inputs explicitly and reaches the disk only through
//! the [`fs::FileSystem`] trait, so the test suite runs the whole pipeline
//! against [`fs::InMemoryFs`].
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`normalize`] | Stage 1: collision-safe renaming of duplicate-suffixed files |
//! | [`scan`] | Stage 2: eligibility filter, `-2` deduplication, collation order |
//! | [`generate`] | Stage 3: renders the grid fragment with Maud |
//! | [`inject`] | Stage 4: idempotent marker replacement with structural fallback |
//! | [`run`] | The pipeline itself, with explicit [`run::RunOptions`] |
//! | [`naming`] | Pure filename rules: canonical name, alternate, title, slug |
//! | [`config`] | Optional `grid.toml` loading, merging and validation |
//! | [`fs`] | File-system capability with real and in-memory implementations |
//! | [`types`] | Shared types (`ImageEntry`) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## The Markers Are a Contract
//!
//! Content between `<!-- GRID:START -->` and `<!-- GRID:END -->` belongs to
//! the tool and is rewritten on every run; everything else in the document
//! belongs to its author and is never touched. A second run over an unchanged
//! directory leaves the document byte-for-byte identical.
//!
//! ## Stable Slugs
//!
//! Detail pages are looked up by a slug derived from the filename, so a stray
//! `photo 2.jpg` copy would otherwise break the link for `photo.jpg`. The
//! normalizer folds such copies back to their canonical names before listing,
//! and never overwrites an existing file to do so.

pub mod config;
pub mod fs;
pub mod generate;
pub mod inject;
pub mod naming;
pub mod normalize;
pub mod output;
pub mod run;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
