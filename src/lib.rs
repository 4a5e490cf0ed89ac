//! Activity feed library.
//!
//! Reads a spreadsheet used as a content store, normalizes its rows into
//! posts, and serves a live page: summary cards, a paginated full list and a
//! detail view, each with auto-rotating image carousels.

pub mod components;
pub mod config;
pub mod constants;
pub mod feed;
pub mod view;
pub mod web;
