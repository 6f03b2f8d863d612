//! Marker-based injection of the grid fragment into the target document.
//!
//! The document owns everything outside the marker pair; this module owns
//! everything between. Given a document and a fragment, [`inject`] returns the
//! updated document:
//!
//! - **Markers present**: the first start marker and the first end marker after
//!   it delimit the region. The whole region, markers included, is replaced by
//!   `start + "\n" + fragment + "\n  " + end`.
//! - **No usable pair**: a freshly wrapped block is inserted before the first
//!   `</main>`, else before the first `</body>`, else appended.
//!
//! Running [`inject`] again with the same fragment on its own output returns the
//! same bytes.

use crate::config::MarkersConfig;

const MAIN_CLOSE: &str = "</main>";
const BODY_CLOSE: &str = "</body>";

/// Which path the injector took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Injection {
    /// Content between an existing marker pair was replaced.
    Replaced,
    /// No marker pair; a new block was inserted before this closing tag.
    InsertedBefore(&'static str),
    /// No marker pair and no closing tag; the block was appended.
    Appended,
}

/// Result of injecting a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injected {
    pub document: String,
    pub injection: Injection,
}

/// Byte range of the first well-formed marker pair, end marker included.
pub fn find_region(document: &str, markers: &MarkersConfig) -> Option<(usize, usize)> {
    let start = document.find(&markers.start)?;
    let search_from = start + markers.start.len();
    let end = document[search_from..].find(&markers.end)? + search_from;
    Some((start, end + markers.end.len()))
}

/// The text that sits between a marker pair, markers included.
fn wrapped(fragment: &str, markers: &MarkersConfig) -> String {
    format!("{}\n{}\n  {}", markers.start, fragment, markers.end)
}

/// Inject `fragment` into `document`.
pub fn inject(document: &str, fragment: &str, markers: &MarkersConfig) -> Injected {
    if let Some((start, end)) = find_region(document, markers) {
        let mut out = String::with_capacity(document.len() + fragment.len());
        out.push_str(&document[..start]);
        out.push_str(&wrapped(fragment, markers));
        out.push_str(&document[end..]);
        return Injected {
            document: out,
            injection: Injection::Replaced,
        };
    }

    let block = format!("\n  {}\n", wrapped(fragment, markers));
    for tag in [MAIN_CLOSE, BODY_CLOSE] {
        if let Some(pos) = document.find(tag) {
            let mut out = String::with_capacity(document.len() + block.len());
            out.push_str(&document[..pos]);
            out.push_str(&block);
            out.push_str(&document[pos..]);
            return Injected {
                document: out,
                injection: Injection::InsertedBefore(tag),
            };
        }
    }

    Injected {
        document: format!("{document}{block}"),
        injection: Injection::Appended,
    }
}

/// Whether the document mentions a marker without forming a usable pair.
///
/// Injection still succeeds through the fallback path, but the stray marker is
/// usually a hand-editing mistake worth reporting.
pub fn has_stray_marker(document: &str, markers: &MarkersConfig) -> bool {
    find_region(document, markers).is_none()
        && (document.contains(&markers.start) || document.contains(&markers.end))
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "<!-- GRID:START -->";
    const END: &str = "<!-- GRID:END -->";

    fn markers() -> MarkersConfig {
        MarkersConfig::default()
    }

    #[test]
    fn replaces_between_markers() {
        let doc = format!("<main>\n  {START}\nold stuff\n  {END}\n</main>\n");
        let out = inject(&doc, "<p>new</p>", &markers());
        assert_eq!(out.injection, Injection::Replaced);
        assert_eq!(
            out.document,
            format!("<main>\n  {START}\n<p>new</p>\n  {END}\n</main>\n")
        );
    }

    #[test]
    fn content_outside_markers_untouched() {
        let doc = format!("<h1>Shop</h1>{START}x{END}<footer>(c)</footer>");
        let out = inject(&doc, "GRID", &markers());
        assert!(out.document.starts_with("<h1>Shop</h1>"));
        assert!(out.document.ends_with("<footer>(c)</footer>"));
    }

    #[test]
    fn adjacent_markers_with_empty_region() {
        let doc = format!("{START}{END}");
        let out = inject(&doc, "G", &markers());
        assert_eq!(out.document, format!("{START}\nG\n  {END}"));
    }

    #[test]
    fn replacement_is_idempotent() {
        let doc = format!("<body>\n{START}\nstale\n{END}\n</body>");
        let once = inject(&doc, "\n  <div class=\"grid\"></div>", &markers()).document;
        let twice = inject(&once, "\n  <div class=\"grid\"></div>", &markers()).document;
        assert_eq!(once, twice);
    }

    #[test]
    fn fallback_inserts_before_main() {
        let doc = "<body><main><h1>Hi</h1></main></body>";
        let out = inject(doc, "G", &markers());
        assert_eq!(out.injection, Injection::InsertedBefore("</main>"));
        assert_eq!(
            out.document,
            format!("<body><main><h1>Hi</h1>\n  {START}\nG\n  {END}\n</main></body>")
        );
    }

    #[test]
    fn fallback_inserts_before_body() {
        let doc = "<body><p>x</p></body>";
        let out = inject(doc, "G", &markers());
        assert_eq!(out.injection, Injection::InsertedBefore("</body>"));
        assert!(out.document.ends_with(&format!("{END}\n</body>")));
    }

    #[test]
    fn fallback_appends_without_structure() {
        let out = inject("plain text", "G", &markers());
        assert_eq!(out.injection, Injection::Appended);
        assert_eq!(out.document, format!("plain text\n  {START}\nG\n  {END}\n"));
    }

    #[test]
    fn fallback_then_rerun_is_stable() {
        let doc = "<main></main>";
        let first = inject(doc, "G", &markers());
        let second = inject(&first.document, "G", &markers());
        assert_eq!(second.injection, Injection::Replaced);
        assert_eq!(first.document, second.document);
    }

    #[test]
    fn only_first_pair_is_replaced() {
        let doc = format!("{START}a{END}|{START}b{END}");
        let out = inject(&doc, "G", &markers());
        assert_eq!(out.document, format!("{START}\nG\n  {END}|{START}b{END}"));
    }

    #[test]
    fn end_marker_before_start_is_ignored() {
        let doc = format!("{END} intro {START} body {END}");
        let (start, end) = find_region(&doc, &markers()).unwrap();
        assert_eq!(&doc[start..end], format!("{START} body {END}"));
    }

    #[test]
    fn misordered_markers_use_fallback() {
        let doc = format!("<main>{END}{START}</main>");
        let out = inject(&doc, "G", &markers());
        assert_eq!(out.injection, Injection::InsertedBefore("</main>"));
        assert!(has_stray_marker(&doc, &markers()));
    }

    #[test]
    fn well_formed_document_has_no_stray_marker() {
        let doc = format!("{START}{END}");
        assert!(!has_stray_marker(&doc, &markers()));
        assert!(!has_stray_marker("<main></main>", &markers()));
    }

    #[test]
    fn custom_markers() {
        let custom = MarkersConfig {
            start: "<!-- a -->".to_string(),
            end: "<!-- b -->".to_string(),
        };
        let out = inject("<!-- a -->old<!-- b -->", "new", &custom);
        assert_eq!(out.document, "<!-- a -->\nnew\n  <!-- b -->");
    }
}
