//! Carousel component for post image sequences.
//!
//! Renders every slide up front with slide 0 active; rotation is driven by
//! `slide` patches addressed to the carousel's slot.

use maud::{html, Markup, Render};

use crate::view::patch::SlotId;

/// Hides an image in place when it fails to load.
pub const HIDE_ON_ERROR: &str = "this.style.display='none'";

/// Carousel component for a post's images.
///
/// # Example
///
/// ```ignore
/// use crate::components::Carousel;
///
/// let carousel = Carousel::new(slot, &images, "Beach cleanup").show_indicators(true);
///
/// html! {
///     (carousel)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Carousel<'a> {
    /// Slot this carousel is addressed by
    pub slot: SlotId,
    /// Canonical image URLs
    pub images: &'a [String],
    /// Alt text prefix for each slide
    pub alt: &'a str,
    /// Whether to render clickable indicator dots
    pub show_indicators: bool,
}

impl<'a> Carousel<'a> {
    /// Create a new carousel for the given slot.
    #[must_use]
    pub fn new(slot: SlotId, images: &'a [String], alt: &'a str) -> Self {
        Self {
            slot,
            images,
            alt,
            show_indicators: false,
        }
    }

    /// Set whether to render indicator dots. Dots only appear with 2+ images.
    #[must_use]
    pub fn show_indicators(mut self, show: bool) -> Self {
        self.show_indicators = show;
        self
    }
}

impl Render for Carousel<'_> {
    fn render(&self) -> Markup {
        let total = self.images.len();
        if total == 0 {
            return html! {};
        }

        let slot = self.slot.to_string();

        html! {
            div class="slider" id=(format!("carousel-{slot}")) data-slot=(slot) {
                @for (index, src) in self.images.iter().enumerate() {
                    img class=(if index == 0 { "slide active" } else { "slide" })
                        src=(src)
                        alt=(format!("{} - image {}", self.alt, index + 1))
                        data-index=(index)
                        loading=(if index == 0 { "eager" } else { "lazy" })
                        onerror=(HIDE_ON_ERROR);
                }

                @if self.show_indicators && total > 1 {
                    div class="slider-controls" {
                        @for index in 0..total {
                            span class=(if index == 0 { "slider-dot active" } else { "slider-dot" })
                                 data-action="select_slide"
                                 data-slot=(slot)
                                 data-index=(index)
                                 aria-label=(format!("Go to image {}", index + 1)) {}
                        }
                    }
                }
            }
        }
    }
}
