//! Base layout components for the web UI.
//!
//! This module provides the page skeleton: head, header, the containers the
//! live session renders into, and the footer.

use maud::{html, Markup, DOCTYPE};

use super::alert::Alert;
use crate::constants::LOADING_MESSAGE;
use crate::view::patch::Region;

/// Base page layout builder.
///
/// # Example
///
/// ```ignore
/// use maud::html;
/// use crate::components::layout::BaseLayout;
///
/// let content = html! { h1 { "Hello World" } };
/// let page = BaseLayout::new("Activities").render(content);
/// ```
#[derive(Debug, Clone)]
pub struct BaseLayout<'a> {
    title: &'a str,
}

impl<'a> BaseLayout<'a> {
    /// Create a new base layout with the given page title.
    #[must_use]
    pub fn new(title: &'a str) -> Self {
        Self { title }
    }

    /// Render the complete HTML page with the given content.
    ///
    /// The content will be placed inside the `<main class="container">` element.
    #[must_use]
    pub fn render(self, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (self.title) }
                    link rel="stylesheet" href="/static/css/style.css";
                }
                body {
                    header class="container" {
                        h1 { (self.title) }
                    }
                    main class="container" {
                        (content)
                    }
                    (Self::render_footer())
                    script src="/static/js/live.js" {}
                }
            }
        }
    }

    /// Render the page footer.
    fn render_footer() -> Markup {
        html! {
            footer class="container" {
                small { "Updated live from the activity sheet." }
            }
        }
    }
}

/// The three regions the live session patches: the summary container and
/// the two overlays, hidden until opened.
#[must_use]
pub fn feed_regions() -> Markup {
    html! {
        section id="activities" {
            div id=(Region::Summary.dom_id()) class="posts" {
                (Alert::info(LOADING_MESSAGE))
            }
        }
        div id=(Region::FullList.dom_id()) class="overlay" hidden {}
        div id=(Region::Detail.dom_id()) class="overlay" hidden {}
    }
}
