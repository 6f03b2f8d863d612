//! The build pipeline.
//!
//! A single linear pass with explicit inputs:
//!
//! ```text
//! 1. Ensure   public/ and public/<photos>/ exist
//! 2. Normalize filenames in the photos directory
//! 3. List     eligible images
//! 4. Render   the grid fragment
//! 5. Inject   it into the document and write it back if it changed
//! ```
//!
//! The root path and CI signal come in through [`RunOptions`] rather than
//! from the process environment, and every side effect goes through
//! [`FileSystem`], so the whole pipeline runs against `InMemoryFs` in tests.
//!
//! In dry-run mode nothing is created, renamed or written; the listing is
//! computed from the names the normalizer *would* produce.

use crate::config::{ConfigError, GridConfig};
use crate::fs::FileSystem;
use crate::generate;
use crate::inject::{self, Injection};
use crate::normalize::{self, NormalizeReport};
use crate::scan::{self, ScanError};
use crate::types::ImageEntry;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Error, Debug)]
pub enum RunError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read {path}: {source}")]
    ReadDocument {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    WriteDocument {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("No images found in {0}")]
    NoImages(PathBuf),
}

/// Inputs that would otherwise be read from the process environment.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Document root: holds the document, detail pages and public directory.
    pub root: PathBuf,
    /// Treat an empty gallery as a failure.
    pub ci: bool,
    /// Compute everything, change nothing on disk.
    pub dry_run: bool,
}

impl RunOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ci: false,
            dry_run: false,
        }
    }
}

/// What a run did.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub normalize: NormalizeReport,
    pub images: Vec<ImageEntry>,
    pub injection: Injection,
    /// The injected document differs from the one on disk.
    pub document_changed: bool,
    pub document_path: PathBuf,
}

impl RunReport {
    /// Whether a build would leave the directory and document as they are.
    ///
    /// Skipped collisions don't count: no build can resolve them.
    pub fn is_up_to_date(&self) -> bool {
        !self.document_changed && self.normalize.renamed.is_empty()
    }
}

/// Whether a CI signal value counts as set: present and non-empty.
pub fn ci_signal(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Run the full pipeline.
pub fn run(
    fs: &dyn FileSystem,
    config: &GridConfig,
    options: &RunOptions,
) -> Result<RunReport, RunError> {
    let root = options.root.as_path();
    let photos = config.photos_path(root);

    if !options.dry_run {
        for dir in [config.public_path(root), photos.clone()] {
            if !fs.exists(&dir) {
                fs.create_dir_all(&dir)
                    .map_err(|source| RunError::CreateDir {
                        path: dir.clone(),
                        source,
                    })?;
            }
        }
    }

    let normalized =
        normalize::normalize(fs, &photos, options.dry_run).map_err(ScanError::from)?;

    let images = if options.dry_run {
        scan::select_images(normalized.entries.as_slice(), &config.images)
    } else {
        scan::list_images(fs, &photos, &config.images)?
    };

    if images.is_empty() {
        error!("No images found in {}", config.photos_url());
        if options.ci {
            return Err(RunError::NoImages(photos));
        }
    }

    let fragment = generate::build_grid(fs, root, config, &images);

    let document_path = config.document_path(root);
    let current = fs
        .read_to_string(&document_path)
        .map_err(|source| RunError::ReadDocument {
            path: document_path.clone(),
            source,
        })?;
    if inject::has_stray_marker(&current, &config.markers) {
        warn!(
            "{} has a marker without a matching pair; inserting a new block",
            document_path.display()
        );
    }
    let injected = inject::inject(&current, &fragment, &config.markers);
    let document_changed = injected.document != current;

    if document_changed && !options.dry_run {
        fs.write(&document_path, &injected.document)
            .map_err(|source| RunError::WriteDocument {
                path: document_path.clone(),
                source,
            })?;
        info!("wrote {}", document_path.display());
    }

    Ok(RunReport {
        normalize: normalized,
        images,
        injection: injected.injection,
        document_changed,
        document_path,
    })
}
