//! Integration tests for view navigation and carousel ownership.

use std::time::Duration;

use activity_feed::config::Config;
use activity_feed::feed::{FeedCollection, PostRecord};
use activity_feed::view::{
    Origin, Patch, Region, SlotId, UiEvent, View, ViewController, ViewEvent, ViewSettings,
};
use tokio::sync::mpsc::{self, UnboundedReceiver};

fn post(i: usize, images: usize) -> PostRecord {
    PostRecord {
        created_at: format!("1/{}/2024", i + 1),
        topic: format!("Activity {i}"),
        event_date: "No date".to_string(),
        description: format!("What happened at activity {i}."),
        image_refs_raw: (0..images)
            .map(|n| format!("https://images.example.com/{i}/{n}.jpg"))
            .collect::<Vec<_>>()
            .join("; "),
    }
}

fn start(posts: usize, images: usize) -> (ViewController, UnboundedReceiver<ViewEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut view = ViewController::new(ViewSettings::from(&Config::for_testing()), tx, None);
    let feed = FeedCollection::from_source_order((0..posts).map(|i| post(i, images)).collect());
    view.handle(ViewEvent::FeedLoaded(Ok(feed)));
    (view, rx)
}

fn ui(view: &mut ViewController, event: UiEvent) {
    view.handle(ViewEvent::Ui(event));
}

#[tokio::test(start_paused = true)]
async fn test_paginated_browsing_of_23_posts() {
    let (mut view, _rx) = start(23, 2);
    assert_eq!(view.view(), View::Summary);
    assert_eq!(view.live_timers(), 3);

    ui(&mut view, UiEvent::ViewAll);
    assert_eq!(view.view(), View::FullList { page: 1 });
    assert_eq!(view.live_timers(), 10);

    ui(&mut view, UiEvent::NextPage);
    ui(&mut view, UiEvent::NextPage);
    assert_eq!(view.view(), View::FullList { page: 3 });
    assert_eq!(view.live_timers(), 3);

    // Already on the last page.
    view.take_patches();
    ui(&mut view, UiEvent::NextPage);
    assert_eq!(view.view(), View::FullList { page: 3 });
    assert!(view.take_patches().is_empty());

    ui(&mut view, UiEvent::OpenPost { index: 21 });
    assert_eq!(
        view.view(),
        View::Detail {
            post: 21,
            origin: Origin::FullList { page: 3 }
        }
    );
    assert_eq!(view.live_timers(), 1);

    ui(&mut view, UiEvent::Close);
    assert_eq!(view.view(), View::FullList { page: 3 });
    assert_eq!(view.live_timers(), 3);

    ui(&mut view, UiEvent::Close);
    assert_eq!(view.view(), View::Summary);
    assert_eq!(view.live_timers(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_summary_detail_round_trip_restores_timers() {
    let (mut view, _rx) = start(5, 3);
    assert_eq!(view.live_timers(), 3);

    for _ in 0..5 {
        ui(&mut view, UiEvent::OpenPost { index: 0 });
        assert_eq!(view.live_timers(), 1);
        ui(&mut view, UiEvent::Close);
        assert_eq!(view.live_timers(), 3);
    }
}

#[tokio::test(start_paused = true)]
async fn test_card_carousel_rotates_on_tick() {
    let (mut view, mut rx) = start(1, 3);
    let slot = SlotId::new(Region::Summary, 0);
    view.take_patches();

    let started = tokio::time::Instant::now();
    let event = rx.recv().await.expect("carousel should tick");
    assert!(started.elapsed() >= Duration::from_millis(3000));
    view.handle(event);

    assert_eq!(
        view.take_patches(),
        vec![
            Patch::Slide {
                slot,
                index: 0,
                active: false
            },
            Patch::Slide {
                slot,
                index: 1,
                active: true
            },
        ]
    );
    assert_eq!(view.carousel(slot).map(|c| c.active_index()), Some(1));
}

#[tokio::test(start_paused = true)]
async fn test_tick_from_torn_down_carousel_is_ignored() {
    let (mut view, mut rx) = start(3, 2);
    let stale = rx.recv().await.expect("carousel should tick");

    ui(&mut view, UiEvent::OpenPost { index: 1 });
    view.take_patches();

    view.handle(stale);
    assert!(view.take_patches().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_detail_indicator_jumps_and_resets_phase() {
    let (mut view, mut rx) = start(2, 4);
    ui(&mut view, UiEvent::OpenPost { index: 1 });
    let slot = SlotId::new(Region::Detail, 1);
    view.take_patches();

    tokio::time::advance(Duration::from_millis(2500)).await;
    ui(&mut view, UiEvent::SelectSlide { slot, index: 3 });
    assert_eq!(view.carousel(slot).map(|c| c.active_index()), Some(3));

    let jumped = tokio::time::Instant::now();
    let event = rx.recv().await.expect("detail carousel should tick");
    assert!(jumped.elapsed() >= Duration::from_millis(4000));
    view.handle(event);

    // Wraps from the last slide to the first.
    assert_eq!(view.carousel(slot).map(|c| c.active_index()), Some(0));
}

#[tokio::test(start_paused = true)]
async fn test_narrow_viewport_shows_two_cards() {
    let (mut view, _rx) = start(6, 2);
    ui(&mut view, UiEvent::Resize { width: 400 });
    assert_eq!(view.live_timers(), 2);

    ui(&mut view, UiEvent::Resize { width: 1280 });
    assert_eq!(view.live_timers(), 3);
}
