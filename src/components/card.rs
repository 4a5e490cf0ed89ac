//! Card components for post previews.

use maud::{html, Markup, Render};

use super::carousel::{Carousel, HIDE_ON_ERROR};
use crate::feed::PostRecord;
use crate::view::patch::SlotId;

/// A clickable post preview.
///
/// The card reports an `open_post` event for its index. Two or more images
/// render as a carousel addressed by the card's slot; a single image renders
/// plain.
///
/// # Example
///
/// ```ignore
/// use crate::components::card::PostCard;
///
/// let card = PostCard::new(&post, SlotId::new(Region::Summary, 0), 120);
/// ```
#[derive(Debug, Clone)]
pub struct PostCard<'a> {
    pub post: &'a PostRecord,
    pub slot: SlotId,
    pub preview_chars: usize,
}

impl<'a> PostCard<'a> {
    /// Create a new post card.
    #[must_use]
    pub const fn new(post: &'a PostRecord, slot: SlotId, preview_chars: usize) -> Self {
        Self {
            post,
            slot,
            preview_chars,
        }
    }
}

impl Render for PostCard<'_> {
    fn render(&self) -> Markup {
        let post = self.post;
        let images = post.images();

        html! {
            article class="post" data-action="open_post" data-index=(self.slot.post) {
                h3 { (post.topic) }
                small { "\u{1f4c5} " (post.event_date) }
                @match images.len() {
                    0 => {}
                    1 => {
                        img src=(images[0]) alt=(post.topic) onerror=(HIDE_ON_ERROR);
                    }
                    _ => {
                        (Carousel::new(self.slot, &images, &post.topic))
                    }
                }
                div class="preview-text" { (post.preview(self.preview_chars)) }
            }
        }
    }
}

/// A grid of post cards.
#[derive(Debug, Clone)]
pub struct PostGrid<'a> {
    pub cards: Vec<PostCard<'a>>,
}

impl<'a> PostGrid<'a> {
    #[must_use]
    pub const fn new(cards: Vec<PostCard<'a>>) -> Self {
        Self { cards }
    }
}

impl Render for PostGrid<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="post-grid" {
                @for card in &self.cards {
                    (card)
                }
            }
        }
    }
}
