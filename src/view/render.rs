//! Region markup for each view state.

use maud::{html, Markup};

use super::patch::{Region, SlotId};
use crate::components::{Alert, Pagination, PostCard, PostDetail, PostGrid};
use crate::constants::{
    EMPTY_FEED_MESSAGE, FETCH_FAILED_MESSAGE, FULL_LIST_PREVIEW_CHARS, LOADING_MESSAGE,
    SUMMARY_PREVIEW_CHARS,
};
use crate::feed::{FeedCollection, PostRecord};

pub fn loading() -> Markup {
    html! { (Alert::info(LOADING_MESSAGE)) }
}

pub fn fetch_failed(detail: &str) -> Markup {
    html! {
        (Alert::error(FETCH_FAILED_MESSAGE).with_detail(detail))
        (refresh_button())
    }
}

fn refresh_button() -> Markup {
    html! {
        button type="button" class="refresh" data-action="refresh" { "Refresh" }
    }
}

/// The first `count` posts plus a "view all" control when more exist.
pub fn summary(feed: &FeedCollection, count: usize) -> Markup {
    if feed.is_empty() {
        return html! {
            (Alert::info(EMPTY_FEED_MESSAGE))
            (refresh_button())
        };
    }

    let cards: Vec<_> = feed
        .slice(0..count)
        .map(|(index, post)| {
            PostCard::new(post, SlotId::new(Region::Summary, index), SUMMARY_PREVIEW_CHARS)
        })
        .collect();

    html! {
        (PostGrid::new(cards))
        @if feed.len() > count {
            button type="button" class="view-all" data-action="view_all" {
                "View all activities (" (feed.len()) ")"
            }
        }
        (refresh_button())
    }
}

/// One page of the full list with its controls.
pub fn full_list(feed: &FeedCollection, pagination: &Pagination) -> Markup {
    let cards: Vec<_> = feed
        .slice(pagination.item_range())
        .map(|(index, post)| {
            PostCard::new(post, SlotId::new(Region::FullList, index), FULL_LIST_PREVIEW_CHARS)
        })
        .collect();

    html! {
        div class="overlay-content" {
            div class="overlay-header" {
                h2 { "All Activities" }
                button type="button" class="close-button" data-action="close" aria-label="Close" {
                    "\u{00d7}"
                }
            }
            div class="overlay-body" {
                @if feed.is_empty() {
                    (Alert::info(EMPTY_FEED_MESSAGE))
                } @else {
                    (PostGrid::new(cards))
                }
            }
            (pagination)
        }
    }
}

pub fn detail(post: &PostRecord, index: usize) -> Markup {
    html! {
        div class="overlay-content" {
            (PostDetail::new(post, index))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(n: usize) -> FeedCollection {
        FeedCollection::from_source_order(
            (0..n)
                .map(|i| PostRecord {
                    created_at: String::new(),
                    topic: format!("Post {i}"),
                    event_date: "No date".to_string(),
                    description: "Body".to_string(),
                    image_refs_raw: String::new(),
                })
                .collect(),
        )
    }

    #[test]
    fn test_summary_limits_cards() {
        let html = summary(&feed(5), 3).into_string();
        assert_eq!(html.matches(r#"data-action="open_post""#).count(), 3);
        assert!(html.contains(r#"data-action="view_all""#));
        assert!(html.contains("View all activities (5)"));
        // Newest first: source order was 0..5.
        assert!(html.contains("Post 4"));
        assert!(!html.contains("Post 1<"));
    }

    #[test]
    fn test_summary_without_overflow_has_no_view_all() {
        let html = summary(&feed(2), 3).into_string();
        assert_eq!(html.matches(r#"data-action="open_post""#).count(), 2);
        assert!(!html.contains("view_all"));
    }

    #[test]
    fn test_summary_empty_feed() {
        let html = summary(&feed(0), 3).into_string();
        assert!(html.contains(EMPTY_FEED_MESSAGE));
        assert!(html.contains(r#"data-action="refresh""#));
    }

    #[test]
    fn test_summary_offers_refresh() {
        let html = summary(&feed(2), 3).into_string();
        assert!(html.contains(r#"data-action="refresh""#));
    }

    #[test]
    fn test_full_list_last_page() {
        let feed = feed(23);
        let html = full_list(&feed, &Pagination::new(feed.len(), 10, 3)).into_string();
        assert_eq!(html.matches(r#"data-action="open_post""#).count(), 3);
        assert!(html.contains(r#"data-index="20""#));
        assert!(html.contains(r#"data-index="22""#));
        assert!(html.contains("Page 3 of 3"));
    }

    #[test]
    fn test_fetch_failed_message() {
        let html = fetch_failed("unexpected status 500").into_string();
        assert!(html.contains(FETCH_FAILED_MESSAGE));
        assert!(html.contains("unexpected status 500"));
        assert!(html.contains(r#"data-action="refresh""#));
    }
}
