//! Full view of a single post.

use maud::{html, Markup, Render};

use super::carousel::Carousel;
use crate::feed::PostRecord;
use crate::view::patch::{Region, SlotId};

/// Untruncated post with its image carousel and a close control.
#[derive(Debug, Clone)]
pub struct PostDetail<'a> {
    pub post: &'a PostRecord,
    pub index: usize,
}

impl<'a> PostDetail<'a> {
    #[must_use]
    pub const fn new(post: &'a PostRecord, index: usize) -> Self {
        Self { post, index }
    }

    /// Slot the detail carousel is addressed by.
    #[must_use]
    pub const fn slot(&self) -> SlotId {
        SlotId::new(Region::Detail, self.index)
    }
}

impl Render for PostDetail<'_> {
    fn render(&self) -> Markup {
        let post = self.post;
        let images = post.images();

        html! {
            div class="post post-detail" data-index=(self.index) {
                button type="button" class="back-button" data-action="close" {
                    "\u{2190} Back to Activities"
                }
                h2 { (post.topic) }
                small { "\u{1f4c5} " (post.event_date) }
                (Carousel::new(self.slot(), &images, &post.topic).show_indicators(true))
                div class="post-content" { (post.description) }
            }
        }
    }
}
