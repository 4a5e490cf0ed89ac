//! Maud HTML template components for the feed page.
//!
//! Components are organized into submodules by functionality:
//!
//! - `layout`: Base page layout and the live regions
//! - `alert`: Loading, empty and error notices
//! - `card`: Post preview cards and grids
//! - `carousel`: Rotating image sequences
//! - `detail`: Single post view
//! - `pagination`: Previous/next controls and page arithmetic

pub mod alert;
pub mod card;
pub mod carousel;
pub mod detail;
pub mod layout;
pub mod pagination;

pub use alert::{Alert, AlertVariant};
pub use card::{PostCard, PostGrid};
pub use carousel::Carousel;
pub use detail::PostDetail;
pub use layout::{feed_regions, BaseLayout};
pub use pagination::Pagination;

/// Re-export maud for convenience
pub use maud::{html, Markup, PreEscaped, DOCTYPE};
