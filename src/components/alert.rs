//! Inline notices: errors, loading and empty states.

use maud::{html, Markup, Render};

/// Alert variant types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertVariant {
    Error,
    Info,
}

impl AlertVariant {
    /// Get the CSS class for the alert element.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        match self {
            Self::Error => "no-posts error",
            Self::Info => "no-posts",
        }
    }
}

/// An inline notice shown in place of region content.
///
/// # Example
///
/// ```ignore
/// use crate::components::alert::Alert;
///
/// let alert = Alert::error(FETCH_FAILED_MESSAGE).with_detail(&error_text);
/// ```
#[derive(Debug, Clone)]
pub struct Alert<'a> {
    pub variant: AlertVariant,
    pub message: &'a str,
    pub detail: Option<&'a str>,
}

impl<'a> Alert<'a> {
    /// Create a new alert with the given variant and message.
    #[must_use]
    pub const fn new(variant: AlertVariant, message: &'a str) -> Self {
        Self {
            variant,
            message,
            detail: None,
        }
    }

    /// Create an error alert.
    #[must_use]
    pub const fn error(message: &'a str) -> Self {
        Self::new(AlertVariant::Error, message)
    }

    /// Create an informational notice (loading, empty feed).
    #[must_use]
    pub const fn info(message: &'a str) -> Self {
        Self::new(AlertVariant::Info, message)
    }

    /// Add a second line with technical detail.
    #[must_use]
    pub const fn with_detail(mut self, detail: &'a str) -> Self {
        self.detail = Some(detail);
        self
    }
}

impl Render for Alert<'_> {
    fn render(&self) -> Markup {
        html! {
            div class=(self.variant.class()) role=[(self.variant == AlertVariant::Error).then_some("alert")] {
                (self.message)
                @if let Some(detail) = self.detail {
                    br;
                    "Error: " (detail)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_alert() {
        let html = Alert::info("Loading activities...").render().into_string();
        assert_eq!(html, r#"<div class="no-posts">Loading activities...</div>"#);
    }

    #[test]
    fn test_error_alert_with_detail() {
        let html = Alert::error("Could not load")
            .with_detail("status 404 <Not Found>")
            .render()
            .into_string();
        assert!(html.contains(r#"class="no-posts error""#));
        assert!(html.contains(r#"role="alert""#));
        assert!(html.contains("<br>Error: status 404 &lt;Not Found&gt;"));
    }
}
