//! Forge release API client.
//!
//! Provides an async client for the GitHub REST release endpoints used to
//! republish an asset: release-by-tag lookup, asset deletion and asset
//! upload. [`ReleaseApi`] abstracts those three calls so the publishing
//! pipeline can be exercised against a mock.

pub mod api;
pub mod client;
pub mod types;

pub use api::{ApiFuture, ReleaseApi};
pub use client::{Client, DEFAULT_API_URL, DEFAULT_UPLOAD_URL, Error};
pub use types::{Asset, Release, UploadedAsset};
