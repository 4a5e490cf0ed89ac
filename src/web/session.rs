//! One live page session over a websocket.
//!
//! The session task owns a [`ViewController`] and feeds it, one at a time,
//! the page's gestures, carousel ticks, and feed fetch results. Patches are
//! flushed to the page as one JSON array after every event.

use anyhow::{Context, Result};
use axum::extract::ws::{Message, WebSocket};
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::AppState;
use crate::feed::FeedRepository;
use crate::view::{UiEvent, ViewController, ViewEvent, ViewSettings};

/// Parse the `post` navigation parameter. Anything but a non-negative
/// integer is ignored.
#[must_use]
pub fn parse_post_param(raw: &str) -> Option<usize> {
    raw.trim().parse().ok()
}

pub async fn run(socket: WebSocket, state: AppState, initial_post: Option<usize>) {
    let (mut sink, mut stream) = socket.split();
    let (events, mut inbox) = mpsc::unbounded_channel();

    let settings = ViewSettings::from(state.config.as_ref());
    let mut view = ViewController::new(settings, events.clone(), initial_post);
    let mut fetches = FetchTasks::default();
    fetches.spawn(&state.repository, &events);

    info!(?initial_post, "Live session started");

    loop {
        if let Err(e) = flush(&mut sink, &mut view).await {
            debug!("Live session send failed: {e:#}");
            break;
        }

        tokio::select! {
            message = stream.next() => match message {
                Some(Ok(Message::Text(text))) => match serde_json::from_str::<UiEvent>(&text) {
                    Ok(event) => {
                        if event == UiEvent::Refresh {
                            fetches.spawn(&state.repository, &events);
                        }
                        view.handle(ViewEvent::Ui(event));
                    }
                    Err(e) => debug!(%text, "Ignoring malformed page event: {e}"),
                },
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!("Live session receive failed: {e}");
                    break;
                }
            },
            Some(event) = inbox.recv() => view.handle(event),
        }
    }

    view.shutdown();
    fetches.abort_all();
    info!("Live session ended");
}

/// Background feed fetches owned by one session. Results arrive as view
/// events; anything still in flight is aborted when the session ends.
#[derive(Debug, Default)]
struct FetchTasks {
    handles: Vec<JoinHandle<()>>,
}

impl FetchTasks {
    fn spawn(&mut self, repository: &FeedRepository, events: &UnboundedSender<ViewEvent>) {
        self.handles.retain(|handle| !handle.is_finished());

        let repository = repository.clone();
        let events = events.clone();
        self.handles.push(tokio::spawn(async move {
            let result = repository.fetch().await;
            // A closed channel means the session already ended.
            let _ = events.send(ViewEvent::FeedLoaded(result));
        }));
    }

    #[cfg(test)]
    fn in_flight(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }

    fn abort_all(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for FetchTasks {
    fn drop(&mut self) {
        self.abort_all();
    }
}

async fn flush(sink: &mut SplitSink<WebSocket, Message>, view: &mut ViewController) -> Result<()> {
    let patches = view.take_patches();
    if patches.is_empty() {
        return Ok(());
    }

    let payload = serde_json::to_string(&patches).context("Failed to encode patches")?;
    sink.send(Message::Text(payload))
        .await
        .context("Failed to send patches")?;
    Ok(())
}
