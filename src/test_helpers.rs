//! Shared test utilities for the grid-inject test suite.
//!
//! Builds in-memory sites with the stock layout so each module can exercise
//! its logic without touching the disk.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let fs = site_with_photos(&["photo.jpg", "photo 2.jpg"]);
//! normalize(&fs, &photos_dir(), false).unwrap();
//! assert_eq!(photo_names(&fs), vec!["photo-2.jpg", "photo.jpg"]);
//! ```

use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

use crate::fs::{FileSystem, InMemoryFs};

/// A minimal hand-authored page with an empty marker region.
pub const SAMPLE_DOCUMENT: &str = "<!DOCTYPE html>
<html>
<body>
<main>
  <h1>Shop</h1>
  <!-- GRID:START -->
  <!-- GRID:END -->
</main>
</body>
</html>
";

// =========================================================================
// Fixture setup
// =========================================================================

pub fn site_root() -> PathBuf {
    PathBuf::from("/site")
}

pub fn photos_dir() -> PathBuf {
    site_root().join("public/etsy_photos")
}

/// In-memory site with the sample document and the given photo files.
///
/// The photos directory always exists, even when `photos` is empty.
pub fn site_with_photos(photos: &[&str]) -> InMemoryFs {
    let fs = InMemoryFs::new();
    fs.add_file(site_root().join("index.html"), SAMPLE_DOCUMENT);
    fs.add_dir(photos_dir());
    for name in photos {
        fs.add_file(photos_dir().join(name), "fake image");
    }
    fs
}

// =========================================================================
// Lookups (panic with a clear message on miss)
// =========================================================================

/// Entry names in the photos directory, sorted byte-wise.
pub fn photo_names(fs: &InMemoryFs) -> Vec<String> {
    fs.read_dir(&photos_dir())
        .unwrap_or_else(|e| panic!("photos directory unreadable: {e}"))
}

/// Current contents of the site's `index.html`.
pub fn document(fs: &InMemoryFs) -> String {
    fs.contents(&site_root().join("index.html"))
        .unwrap_or_else(|| panic!("index.html missing from {}", site_root().display()))
}

// =========================================================================
// Log capture
// =========================================================================

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a thread-local subscriber and return its result along with
/// every event at `WARN` or above, formatted without colors.
pub fn capture_warnings<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).to_string();
    (result, logs)
}
