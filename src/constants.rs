//! Shared constants used across the application.

/// User agent sent when fetching the feed table.
pub const FEED_USER_AGENT: &str = "activity-feed/0.1";

/// Base of the spreadsheet visualization query endpoint.
pub const SHEET_QUERY_BASE: &str = "https://docs.google.com/spreadsheets/d";

/// Sheet tab read when `SHEET_NAME` is not set.
pub const DEFAULT_SHEET_NAME: &str = "Form Responses 1";

/// Length of the `/*O_o*/\ngoogle.visualization.Query.setResponse(` wrapper.
pub const ENVELOPE_PREFIX_LEN: usize = 47;

/// Length of the trailing `);` wrapper.
pub const ENVELOPE_SUFFIX_LEN: usize = 2;

/// Canonical display URL for a storage-provider file id.
pub const THUMBNAIL_URL_PREFIX: &str = "https://drive.google.com/thumbnail?id=";

/// Width parameter appended to every canonical thumbnail URL.
pub const THUMBNAIL_SIZE_PARAM: &str = "&sz=w1000";

/// Shown when a row has no event date.
pub const DEFAULT_EVENT_DATE: &str = "No date";

/// Shown when a row has no description.
pub const DEFAULT_DESCRIPTION: &str = "No description available.";

/// Preview budget for cards in the summary list.
pub const SUMMARY_PREVIEW_CHARS: usize = 120;

/// Preview budget for cards in the paginated full list.
pub const FULL_LIST_PREVIEW_CHARS: usize = 150;

/// Marker appended to truncated previews.
pub const ELLIPSIS: &str = "...";

/// Summary cards shown on narrow viewports.
pub const SUMMARY_CARDS_NARROW: usize = 2;

/// Summary cards shown on wide viewports.
pub const SUMMARY_CARDS_WIDE: usize = 3;

/// Viewport width assumed until the client reports one.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1024;

pub const LOADING_MESSAGE: &str = "Loading activities...";
pub const EMPTY_FEED_MESSAGE: &str = "No activities yet. Check back soon!";
pub const FETCH_FAILED_MESSAGE: &str = "Error loading activities. Make sure the sheet is public!";
