//! Gallery grid rendering.
//!
//! Turns the ordered image listing into the HTML fragment that is injected
//! between the document markers.
//!
//! ## Output
//!
//! ```html
//!   <div class="grid">
//!     <figure class="card">
//!       <a href="/product-blue-vase" aria-label="View Blue Vase"><img src="/public/etsy_photos/blue-vase.jpg" alt="Blue Vase" loading="lazy" decoding="async"></a>
//!       <figcaption>Blue Vase</figcaption>
//!     </figure>
//!   </div>
//! ```
//!
//! Cards are emitted in listing order. A card links to its detail page only
//! when `product-<slug>.html` exists at the document root; otherwise the image
//! is rendered bare. An empty listing renders a placeholder paragraph instead
//! of an empty grid.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) so titles and filenames are escaped.
//! The whitespace literals keep the fragment readable inside the hand-authored
//! document.

use crate::config::GridConfig;
use crate::fs::FileSystem;
use crate::types::ImageEntry;
use maud::{Markup, html};
use std::path::Path;

/// Everything needed to render one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub src: String,
    pub title: String,
    /// Link to the detail page, when one exists.
    pub href: Option<String>,
}

/// Resolve the cards for a listing, checking for detail pages under `root`.
pub fn build_cards(
    fs: &dyn FileSystem,
    root: &Path,
    config: &GridConfig,
    images: &[ImageEntry],
) -> Vec<Card> {
    let base_url = config.photos_url();
    images
        .iter()
        .map(|image| {
            let slug = image.slug();
            let href = (!slug.is_empty()
                && fs.exists(&root.join(config.detail_pages.filename(&slug))))
            .then(|| config.detail_pages.href(&slug));
            Card {
                src: format!("{}/{}", base_url, image.filename),
                title: image.title(),
                href,
            }
        })
        .collect()
}

/// Render the fragment for a listing.
pub fn build_grid(
    fs: &dyn FileSystem,
    root: &Path,
    config: &GridConfig,
    images: &[ImageEntry],
) -> String {
    if images.is_empty() {
        return render_empty(config).into_string();
    }
    render_grid(&build_cards(fs, root, config, images)).into_string()
}

/// Placeholder shown when the photos directory has no eligible images.
pub fn render_empty(config: &GridConfig) -> Markup {
    html! {
        p.grid-empty {
            "Add images to " (config.photos_url()) " to populate the gallery."
        }
    }
}

/// Renders the grid container with one card per entry
pub fn render_grid(cards: &[Card]) -> Markup {
    html! {
        "\n  "
        div.grid {
            @for card in cards {
                "\n    "
                (render_card(card))
            }
            "\n  "
        }
    }
}

/// Renders a single card, linked when the card has a detail page
fn render_card(card: &Card) -> Markup {
    let img = html! {
        img src=(card.src) alt=(card.title) loading="lazy" decoding="async";
    };
    html! {
        figure.card {
            "\n      "
            @if let Some(href) = &card.href {
                a href=(href) aria-label={ "View " (card.title) } { (img) }
            } @else {
                (img)
            }
            "\n      "
            figcaption { (card.title) }
            "\n    "
        }
    }
}
