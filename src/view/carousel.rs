//! Auto-rotating image carousel state.
//!
//! A [`CarouselController`] owns the active slide index of one rendered image
//! sequence and at most one recurring timer. The timer is a tokio task that
//! sends [`CarouselTick`]s into the view's event channel; the view applies a
//! tick by calling [`CarouselController::on_tick`], which ignores ticks from
//! any timer other than the one currently live.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::patch::SlotId;
use super::ViewEvent;

static NEXT_TIMER_ID: AtomicU64 = AtomicU64::new(1);

/// One firing of a carousel timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselTick {
    pub slot: SlotId,
    /// Process-unique id of the timer that fired.
    pub timer: u64,
}

/// Slide transition produced by a tick or a jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideChange {
    pub previous: usize,
    pub current: usize,
}

#[derive(Debug)]
struct Timer {
    id: u64,
    handle: JoinHandle<()>,
}

/// Rotation state machine for one image sequence: `idle` or `running`.
#[derive(Debug)]
pub struct CarouselController {
    slot: SlotId,
    slide_count: usize,
    active_index: usize,
    interval: Duration,
    timer: Option<Timer>,
    events: UnboundedSender<ViewEvent>,
}

impl CarouselController {
    /// Create an idle controller showing slide 0.
    ///
    /// A controller with one slide or none never starts a timer.
    #[must_use]
    pub fn new(
        slot: SlotId,
        slide_count: usize,
        interval: Duration,
        events: UnboundedSender<ViewEvent>,
    ) -> Self {
        Self {
            slot,
            slide_count,
            active_index: 0,
            interval,
            timer: None,
            events,
        }
    }

    #[must_use]
    pub fn slot(&self) -> SlotId {
        self.slot
    }

    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    fn can_rotate(&self) -> bool {
        self.slide_count > 1
    }

    /// Begin rotating. No-op when already running or when there is nothing
    /// to rotate. The first tick fires one full interval from now.
    pub fn start(&mut self) {
        if !self.can_rotate() || self.timer.is_some() {
            return;
        }

        let id = NEXT_TIMER_ID.fetch_add(1, Ordering::Relaxed);
        let slot = self.slot;
        let period = self.interval;
        let first = Instant::now() + period;
        let events = self.events.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(first, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let tick = CarouselTick { slot, timer: id };
                if events.send(ViewEvent::Tick(tick)).is_err() {
                    // Receiver dropped: the view that owned us is gone.
                    break;
                }
            }
        });

        self.timer = Some(Timer { id, handle });
    }

    /// Apply a tick. Returns the slide change, or `None` when the tick came
    /// from a timer that is no longer live.
    pub fn on_tick(&mut self, tick: CarouselTick) -> Option<SlideChange> {
        let live = self.timer.as_ref().is_some_and(|t| t.id == tick.timer);
        if tick.slot != self.slot || !live {
            return None;
        }

        let previous = self.active_index;
        self.active_index = (previous + 1) % self.slide_count;
        Some(SlideChange {
            previous,
            current: self.active_index,
        })
    }

    /// Show slide `index` and restart the rotation clock from zero.
    ///
    /// Returns `None` (and changes nothing) for out-of-range indices or
    /// single-slide carousels.
    pub fn jump_to(&mut self, index: usize) -> Option<SlideChange> {
        if !self.can_rotate() || index >= self.slide_count {
            return None;
        }

        self.stop();
        let previous = self.active_index;
        self.active_index = index;
        self.start();

        Some(SlideChange {
            previous,
            current: index,
        })
    }

    /// Cancel the timer. The active slide stays where it is.
    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.handle.abort();
        }
    }
}

impl Drop for CarouselController {
    fn drop(&mut self) {
        self.stop();
    }
}
