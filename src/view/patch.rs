//! Messages exchanged with the browser page.
//!
//! The page applies [`Patch`]es to its regions and reports gestures as
//! [`UiEvent`]s. Both travel as tagged JSON.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A container on the page that the view renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "posts")]
    Summary,
    #[serde(rename = "all-posts")]
    FullList,
    #[serde(rename = "post-detail")]
    Detail,
}

impl Region {
    /// DOM id of the region's container.
    #[must_use]
    pub const fn dom_id(self) -> &'static str {
        match self {
            Self::Summary => "posts",
            Self::FullList => "all-posts",
            Self::Detail => "post-detail",
        }
    }

    fn from_dom_id(id: &str) -> Option<Self> {
        match id {
            "posts" => Some(Self::Summary),
            "all-posts" => Some(Self::FullList),
            "post-detail" => Some(Self::Detail),
            _ => None,
        }
    }
}

/// Identifies one rendered image sequence: the region it lives in plus the
/// index of the post it shows. Rendered as `<region>-<post>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotId {
    pub region: Region,
    pub post: usize,
}

impl SlotId {
    #[must_use]
    pub const fn new(region: Region, post: usize) -> Self {
        Self { region, post }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.region.dom_id(), self.post)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid slot id: {0}")]
pub struct InvalidSlotId(String);

impl FromStr for SlotId {
    type Err = InvalidSlotId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidSlotId(s.to_string());
        let (region, post) = s.rsplit_once('-').ok_or_else(invalid)?;
        Ok(Self {
            region: Region::from_dom_id(region).ok_or_else(invalid)?,
            post: post.parse().map_err(|_| invalid())?,
        })
    }
}

impl TryFrom<String> for SlotId {
    type Error = InvalidSlotId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SlotId> for String {
    fn from(slot: SlotId) -> Self {
        slot.to_string()
    }
}

/// A change to apply to the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Patch {
    /// Replace a region's content.
    Replace { target: Region, html: String },
    /// Make an overlay region visible.
    Show { target: Region },
    /// Hide an overlay region.
    Hide { target: Region },
    /// Toggle the slide and indicator at `index` of one carousel.
    Slide {
        slot: SlotId,
        index: usize,
        active: bool,
    },
    /// Scroll a region's container back to the top.
    ScrollTop { target: Region },
}

/// A gesture reported by the page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UiEvent {
    /// Card click.
    OpenPost { index: usize },
    /// "View all" on the summary.
    ViewAll,
    NextPage,
    PrevPage,
    /// Back/close on the topmost overlay.
    Close,
    /// Indicator dot click.
    SelectSlide { slot: SlotId, index: usize },
    /// Viewport width changed.
    Resize { width: u32 },
    /// Manual reload of the feed.
    Refresh,
}
