//! Filename normalization for the photos directory.
//!
//! Runs once per build, before listing, so the slugs derived from filenames
//! stay stable when someone drops a `photo 2.jpg` copy into the directory.
//!
//! For every non-hidden entry (processed in byte-wise order):
//!
//! ```text
//! candidate = canonical_name(entry)        "photo 2.jpg" → "photo.jpg"
//! candidate == entry          → nothing to do
//! candidate free              → rename entry → candidate
//! candidate taken, alt free   → rename entry → alternate   "photo-2.jpg"
//! both taken                  → leave entry alone
//! ```
//!
//! "Taken" is judged against the directory as it stands after the renames
//! already made in this pass. Nothing is ever overwritten.
//!
//! A rename that fails with an I/O error is logged and recorded in the
//! [`NormalizeReport`]; the file keeps its name and the pass continues.

use crate::fs::FileSystem;
use crate::naming;
use std::collections::BTreeSet;
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};

/// A rename that was performed (or, in a dry run, would be performed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub from: String,
    pub to: String,
}

/// An entry whose canonical and alternate names were both taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRename {
    pub from: String,
    pub candidate: String,
    pub alternate: String,
}

/// A rename the filesystem refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedRename {
    pub from: String,
    pub to: String,
    pub error: String,
}

/// Outcome of one normalization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub renamed: Vec<Rename>,
    pub skipped: Vec<SkippedRename>,
    pub failed: Vec<FailedRename>,
    /// Directory entry names after the pass, sorted byte-wise.
    pub entries: Vec<String>,
}

impl NormalizeReport {
    pub fn is_noop(&self) -> bool {
        self.renamed.is_empty() && self.skipped.is_empty() && self.failed.is_empty()
    }
}

/// Normalize every filename in `dir`.
///
/// With `dry_run` set, the plan is computed against the current listing but no
/// rename is issued.
pub fn normalize(fs: &dyn FileSystem, dir: &Path, dry_run: bool) -> io::Result<NormalizeReport> {
    let mut report = NormalizeReport::default();
    if !fs.exists(dir) {
        return Ok(report);
    }

    let original = fs.read_dir(dir)?;
    let mut present: BTreeSet<String> = original.iter().cloned().collect();

    for name in &original {
        if name.starts_with('.') {
            continue;
        }
        let candidate = naming::canonical_name(name);
        if candidate == *name || candidate.is_empty() {
            continue;
        }

        let target = if !present.contains(&candidate) {
            candidate
        } else {
            let alternate = naming::alternate_name(&candidate);
            if present.contains(&alternate) {
                debug!(from = %name, %candidate, %alternate, "rename skipped, names taken");
                report.skipped.push(SkippedRename {
                    from: name.clone(),
                    candidate,
                    alternate,
                });
                continue;
            }
            alternate
        };

        if !dry_run {
            if let Err(e) = fs.rename(&dir.join(name), &dir.join(&target)) {
                warn!("rename failed: {name} -> {target}: {e}");
                report.failed.push(FailedRename {
                    from: name.clone(),
                    to: target,
                    error: e.to_string(),
                });
                continue;
            }
        }

        info!("renamed {name} -> {target}");
        present.remove(name);
        present.insert(target.clone());
        report.renamed.push(Rename {
            from: name.clone(),
            to: target,
        });
    }

    report.entries = present.into_iter().collect();
    Ok(report)
}
