//! View state machine for one page session.
//!
//! [`ViewController`] decides what the page shows (summary, paginated full
//! list, or single-post detail), renders regions as [`Patch`]es, and is the
//! sole owner of every live [`CarouselController`]. Every transition tears
//! down all outgoing carousels before any incoming one is created.

pub mod carousel;
pub mod patch;
mod render;

use std::time::Duration;

use maud::Markup;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

pub use carousel::{CarouselController, CarouselTick, SlideChange};
pub use patch::{Patch, Region, SlotId, UiEvent};

use crate::components::Pagination;
use crate::config::Config;
use crate::constants::{DEFAULT_VIEWPORT_WIDTH, SUMMARY_CARDS_NARROW, SUMMARY_CARDS_WIDE};
use crate::feed::{FeedCollection, FetchError};

/// Everything the view reacts to.
#[derive(Debug)]
pub enum ViewEvent {
    Ui(UiEvent),
    Tick(CarouselTick),
    FeedLoaded(Result<FeedCollection, FetchError>),
}

/// Container that was active before a detail view opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Summary,
    FullList { page: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Summary,
    /// Full list overlay at a 1-indexed page.
    FullList { page: usize },
    Detail { post: usize, origin: Origin },
}

#[derive(Debug)]
enum FeedState {
    Loading,
    Ready(FeedCollection),
    Failed,
}

/// Rendering knobs taken from [`Config`].
#[derive(Debug, Clone, Copy)]
pub struct ViewSettings {
    pub card_rotation: Duration,
    pub detail_rotation: Duration,
    pub page_size: usize,
    pub narrow_viewport_max: u32,
}

impl From<&Config> for ViewSettings {
    fn from(config: &Config) -> Self {
        Self {
            card_rotation: config.card_rotation,
            detail_rotation: config.detail_rotation,
            page_size: config.page_size,
            narrow_viewport_max: config.narrow_viewport_max,
        }
    }
}

#[derive(Debug)]
pub struct ViewController {
    settings: ViewSettings,
    feed: FeedState,
    view: View,
    viewport_width: u32,
    /// Post requested by the page's navigation state, applied on first load.
    pending_post: Option<usize>,
    carousels: Vec<(SlotId, CarouselController)>,
    patches: Vec<Patch>,
    events: UnboundedSender<ViewEvent>,
}

impl ViewController {
    /// Create a controller in the loading state.
    ///
    /// `initial_post` opens that post's detail once the feed arrives, if it
    /// is in range.
    #[must_use]
    pub fn new(
        settings: ViewSettings,
        events: UnboundedSender<ViewEvent>,
        initial_post: Option<usize>,
    ) -> Self {
        let mut view = Self {
            settings,
            feed: FeedState::Loading,
            view: View::Summary,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            pending_post: initial_post,
            carousels: Vec::new(),
            patches: Vec::new(),
            events,
        };
        view.show_loading();
        view
    }

    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.feed, FeedState::Loading)
    }

    /// Number of carousels with a running timer.
    #[must_use]
    pub fn live_timers(&self) -> usize {
        self.carousels.iter().filter(|(_, c)| c.is_running()).count()
    }

    /// Carousel currently owning `slot`, if any.
    #[must_use]
    pub fn carousel(&self, slot: SlotId) -> Option<&CarouselController> {
        self.carousels
            .iter()
            .find(|(owned, _)| *owned == slot)
            .map(|(_, c)| c)
    }

    /// Patches produced since the last call.
    pub fn take_patches(&mut self) -> Vec<Patch> {
        std::mem::take(&mut self.patches)
    }

    pub fn handle(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::Ui(event) => self.on_ui(event),
            ViewEvent::Tick(tick) => self.on_tick(tick),
            ViewEvent::FeedLoaded(result) => self.on_feed_loaded(result),
        }
    }

    /// Drop the current feed and show the loading state until the next
    /// [`ViewEvent::FeedLoaded`].
    pub fn begin_load(&mut self) {
        self.teardown();
        self.feed = FeedState::Loading;
        self.view = View::Summary;
        self.show_loading();
    }

    /// Cancel every timer. Called when the session ends.
    pub fn shutdown(&mut self) {
        self.teardown();
    }

    fn show_loading(&mut self) {
        self.hide(Region::FullList);
        self.hide(Region::Detail);
        self.replace(Region::Summary, render::loading());
    }

    fn on_feed_loaded(&mut self, result: Result<FeedCollection, FetchError>) {
        self.teardown();
        self.view = View::Summary;

        match result {
            Ok(feed) => {
                debug!(posts = feed.len(), "Rendering feed");
                let requested = self.pending_post.take().filter(|&i| i < feed.len());
                self.feed = FeedState::Ready(feed);
                self.show_summary();
                if let Some(post) = requested {
                    self.open_detail(post);
                }
            }
            Err(e) => {
                warn!("Failed to load feed: {e}");
                self.pending_post = None;
                self.feed = FeedState::Failed;
                self.replace(Region::Summary, render::fetch_failed(&e.to_string()));
            }
        }
    }

    fn on_ui(&mut self, event: UiEvent) {
        if let UiEvent::Resize { width } = event {
            self.on_resize(width);
            return;
        }
        if event == UiEvent::Refresh {
            self.begin_load();
            return;
        }
        if !matches!(self.feed, FeedState::Ready(_)) {
            debug!(?event, "Ignoring input while no feed is shown");
            return;
        }

        match (event, self.view) {
            (UiEvent::OpenPost { index }, _) => self.open_detail(index),
            (UiEvent::ViewAll, View::Summary) => self.open_full_list(1),
            (UiEvent::NextPage, View::FullList { page }) => self.change_page(page, 1),
            (UiEvent::PrevPage, View::FullList { page }) => self.change_page(page, -1),
            (UiEvent::Close, View::Detail { origin, .. }) => self.close_detail(origin),
            (UiEvent::Close, View::FullList { .. }) => self.close_full_list(),
            (UiEvent::SelectSlide { slot, index }, _) => self.select_slide(slot, index),
            (event, view) => debug!(?event, ?view, "Input not applicable to current view"),
        }
    }

    fn on_tick(&mut self, tick: CarouselTick) {
        let change = self
            .carousels
            .iter_mut()
            .find(|(slot, _)| *slot == tick.slot)
            .and_then(|(_, c)| c.on_tick(tick));

        match change {
            Some(change) => self.slide_patches(tick.slot, change),
            None => debug!(slot = %tick.slot, "Discarding stale carousel tick"),
        }
    }

    fn on_resize(&mut self, width: u32) {
        self.viewport_width = width;
        if self.view == View::Summary && matches!(self.feed, FeedState::Ready(_)) {
            self.teardown();
            self.show_summary();
        }
    }

    fn summary_count(&self) -> usize {
        if self.viewport_width < self.settings.narrow_viewport_max {
            SUMMARY_CARDS_NARROW
        } else {
            SUMMARY_CARDS_WIDE
        }
    }

    fn feed(&self) -> Option<&FeedCollection> {
        match &self.feed {
            FeedState::Ready(feed) => Some(feed),
            FeedState::Loading | FeedState::Failed => None,
        }
    }

    fn pagination(&self, feed: &FeedCollection, page: usize) -> Pagination {
        Pagination::new(feed.len(), self.settings.page_size, page)
    }

    /// Render the summary and start its card carousels.
    fn show_summary(&mut self) {
        let Some(feed) = self.feed().cloned() else {
            return;
        };
        let count = self.summary_count();

        self.view = View::Summary;
        self.replace(Region::Summary, render::summary(&feed, count));
        for (index, post) in feed.slice(0..count) {
            let slides = post.images().len();
            self.mount_carousel(
                SlotId::new(Region::Summary, index),
                slides,
                self.settings.card_rotation,
            );
        }
    }

    /// Render one page of the full list and start that page's carousels.
    fn show_full_list(&mut self, page: usize) {
        let Some(feed) = self.feed().cloned() else {
            return;
        };
        let pagination = self.pagination(&feed, page);

        self.view = View::FullList {
            page: pagination.current_page,
        };
        self.replace(Region::FullList, render::full_list(&feed, &pagination));
        self.show(Region::FullList);
        for (index, post) in feed.slice(pagination.item_range()) {
            let slides = post.images().len();
            self.mount_carousel(
                SlotId::new(Region::FullList, index),
                slides,
                self.settings.card_rotation,
            );
        }
    }

    fn open_full_list(&mut self, page: usize) {
        self.teardown();
        self.show_full_list(page);
        self.scroll_top(Region::FullList);
    }

    fn change_page(&mut self, page: usize, step: isize) {
        let Some(feed) = self.feed() else {
            return;
        };
        let pagination = self.pagination(feed, page);
        let allowed = if step > 0 {
            pagination.has_next()
        } else {
            pagination.has_prev()
        };
        if !allowed {
            debug!(page, step, "Page change out of range");
            return;
        }

        self.teardown();
        self.show_full_list(page.saturating_add_signed(step));
        self.scroll_top(Region::FullList);
    }

    fn close_full_list(&mut self) {
        self.teardown();
        self.hide(Region::FullList);
        self.show_summary();
    }

    fn open_detail(&mut self, index: usize) {
        let Some(feed) = self.feed().cloned() else {
            return;
        };
        let Some(post) = feed.get(index) else {
            debug!(index, "Ignoring request for unknown post");
            return;
        };

        let origin = match self.view {
            View::Summary => Origin::Summary,
            View::FullList { page } => Origin::FullList { page },
            View::Detail { origin, .. } => origin,
        };

        self.teardown();
        self.view = View::Detail {
            post: index,
            origin,
        };
        self.replace(Region::Detail, render::detail(post, index));
        self.show(Region::Detail);
        self.mount_carousel(
            SlotId::new(Region::Detail, index),
            post.images().len(),
            self.settings.detail_rotation,
        );
    }

    /// Rebuild the container the detail was opened from. Carousels restart
    /// at slide 0.
    fn close_detail(&mut self, origin: Origin) {
        self.teardown();
        self.hide(Region::Detail);
        match origin {
            Origin::Summary => self.show_summary(),
            Origin::FullList { page } => self.show_full_list(page),
        }
    }

    fn select_slide(&mut self, slot: SlotId, index: usize) {
        let change = self
            .carousels
            .iter_mut()
            .find(|(owned, _)| *owned == slot)
            .and_then(|(_, c)| c.jump_to(index));

        if let Some(change) = change {
            self.slide_patches(slot, change);
        }
    }

    fn mount_carousel(&mut self, slot: SlotId, slides: usize, interval: Duration) {
        if slides < 2 {
            return;
        }
        let mut carousel = CarouselController::new(slot, slides, interval, self.events.clone());
        carousel.start();
        self.carousels.push((slot, carousel));
    }

    /// Stop and discard every owned carousel.
    fn teardown(&mut self) {
        for (_, mut carousel) in self.carousels.drain(..) {
            carousel.stop();
        }
    }

    fn slide_patches(&mut self, slot: SlotId, change: SlideChange) {
        self.patches.push(Patch::Slide {
            slot,
            index: change.previous,
            active: false,
        });
        self.patches.push(Patch::Slide {
            slot,
            index: change.current,
            active: true,
        });
    }

    fn replace(&mut self, target: Region, html: Markup) {
        self.patches.push(Patch::Replace {
            target,
            html: html.into_string(),
        });
    }

    fn show(&mut self, target: Region) {
        self.patches.push(Patch::Show { target });
    }

    fn hide(&mut self, target: Region) {
        self.patches.push(Patch::Hide { target });
    }

    fn scroll_top(&mut self, target: Region) {
        self.patches.push(Patch::ScrollTop { target });
    }
}

impl Drop for ViewController {
    fn drop(&mut self) {
        self.teardown();
    }
}
