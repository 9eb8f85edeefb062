//! Release API capability trait.
//!
//! `ReleaseApi` is implemented by [`Client`](crate::Client) for the real
//! forge. Using a trait keeps the publishing pipeline decoupled from HTTP
//! and testable with mocks.

use std::future::Future;
use std::pin::Pin;

use crate::client::Error;
use crate::types::{Release, UploadedAsset};

/// Boxed future returned by [`ReleaseApi`] methods.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, Error>> + Send + 'a>>;

/// The three release operations needed to swap an asset.
pub trait ReleaseApi: Send + Sync {
    /// Resolves `tag` in `repo` to a release with its current assets.
    fn release_by_tag(&self, repo: &str, tag: &str) -> ApiFuture<'_, Release>;

    /// Deletes a release asset by ID.
    fn delete_asset(&self, repo: &str, asset_id: u64) -> ApiFuture<'_, ()>;

    /// Uploads `data` as a new asset named `name` on release `release_id`.
    fn upload_asset(
        &self,
        repo: &str,
        release_id: u64,
        name: &str,
        data: Vec<u8>,
    ) -> ApiFuture<'_, UploadedAsset>;
}

impl ReleaseApi for crate::Client {
    fn release_by_tag(&self, repo: &str, tag: &str) -> ApiFuture<'_, Release> {
        let repo = repo.to_string();
        let tag = tag.to_string();
        Box::pin(async move { self.get_release_by_tag(&repo, &tag).await })
    }

    fn delete_asset(&self, repo: &str, asset_id: u64) -> ApiFuture<'_, ()> {
        let repo = repo.to_string();
        Box::pin(async move { self.delete_release_asset(&repo, asset_id).await })
    }

    fn upload_asset(
        &self,
        repo: &str,
        release_id: u64,
        name: &str,
        data: Vec<u8>,
    ) -> ApiFuture<'_, UploadedAsset> {
        let repo = repo.to_string();
        let name = name.to_string();
        Box::pin(async move {
            self.upload_release_asset(&repo, release_id, &name, data)
                .await
        })
    }
}
