//! Publish pipeline.
//!
//! Runs the steps after credential resolution strictly in order: locate,
//! digest, lookup, replace, upload. Every step either hands its result to
//! the next or stops the run with a [`PublishError`], except the
//! stale-asset delete, whose failure is recorded and skipped over.

use std::io::Write;

use msi_relay_artifact::{LocalArtifact, find_latest, sha256_file};
use msi_relay_forge::{Release, ReleaseApi, UploadedAsset};
use tracing::{debug, info, warn};

use crate::config::PublishConfig;
use crate::error::PublishError;
use crate::report::Console;

/// What happened to an asset already published under the target name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplaceOutcome {
    /// The old asset was deleted.
    Deleted { asset_id: u64 },
    /// No asset used the target name.
    NotPresent,
    /// Deleting the old asset failed; the upload still goes ahead.
    DeleteFailed { asset_id: u64, error: String },
}

/// Summary of a successful run.
#[derive(Debug, Clone)]
pub struct PublishReport {
    pub artifact: LocalArtifact,
    pub sha256: String,
    pub release_id: u64,
    pub replaced: ReplaceOutcome,
    pub target_filename: String,
    pub download_url: String,
}

/// Runs the republish steps against a [`ReleaseApi`].
pub struct Publisher<'a> {
    config: &'a PublishConfig,
    api: &'a dyn ReleaseApi,
}

impl<'a> Publisher<'a> {
    pub fn new(config: &'a PublishConfig, api: &'a dyn ReleaseApi) -> Self {
        Self { config, api }
    }

    /// Finds the newest installer in the download folder.
    pub fn locate_artifact(&self) -> Result<LocalArtifact, PublishError> {
        let dir = &self.config.download_dir;
        let pattern = &self.config.file_pattern;

        find_latest(dir, pattern)?.ok_or_else(|| PublishError::ArtifactNotFound {
            dir: dir.clone(),
            pattern: pattern.clone(),
        })
    }

    /// Hex SHA-256 of the installer, for the operator only.
    pub fn compute_digest(&self, artifact: &LocalArtifact) -> Result<String, PublishError> {
        Ok(sha256_file(&artifact.path)?)
    }

    /// Resolves the configured tag to a release and its assets.
    pub async fn lookup_release(&self) -> Result<Release, PublishError> {
        let repo = &self.config.repo;
        let tag = &self.config.release_tag;

        self.api
            .release_by_tag(repo, tag)
            .await
            .map_err(|e| PublishError::from_lookup(repo, tag, e))
    }

    /// Deletes any asset already named like the target.
    ///
    /// Never fails: a failed delete comes back as
    /// [`ReplaceOutcome::DeleteFailed`].
    pub async fn replace_existing(&self, release: &Release) -> ReplaceOutcome {
        let Some(existing) = release.find_asset(&self.config.target_filename) else {
            return ReplaceOutcome::NotPresent;
        };
        let asset_id = existing.id;

        match self.api.delete_asset(&self.config.repo, asset_id).await {
            Ok(()) => {
                info!(asset_id, "old asset deleted");
                ReplaceOutcome::Deleted { asset_id }
            }
            Err(e) => {
                warn!(asset_id, error = %e, "could not delete old asset, uploading anyway");
                ReplaceOutcome::DeleteFailed {
                    asset_id,
                    error: e.to_string(),
                }
            }
        }
    }

    /// Uploads the installer under the target name.
    pub async fn upload(
        &self,
        release_id: u64,
        artifact: &LocalArtifact,
    ) -> Result<UploadedAsset, PublishError> {
        let data = tokio::fs::read(&artifact.path)
            .await
            .map_err(|e| PublishError::Artifact(e.into()))?;

        self.api
            .upload_asset(
                &self.config.repo,
                release_id,
                &self.config.target_filename,
                data,
            )
            .await
            .map_err(PublishError::Upload)
    }

    /// Runs locate, digest, lookup, replace and upload, reporting progress
    /// to `console`.
    pub async fn run<W: Write>(
        &self,
        console: &mut Console<W>,
    ) -> Result<PublishReport, PublishError> {
        console.line("Looking for ActivTrak MSI in Downloads...");
        let artifact = self.locate_artifact()?;
        console.ok(&format!("Found MSI: {}", artifact.file_name));
        console.line(&format!("   Size: {:.2} MB", artifact.size_mib()));
        console.blank();
        debug!(path = %artifact.path.display(), size = artifact.size, "installer selected");

        console.line("Calculating SHA256 hash...");
        let sha256 = self.compute_digest(&artifact)?;
        console.ok(&format!("SHA256: {sha256}"));
        console.blank();

        console.line("Fetching release information...");
        let release = self.lookup_release().await?;
        console.ok(&format!("Found release ID: {}", release.id));
        console.blank();
        info!(release_id = release.id, tag = %self.config.release_tag, "release resolved");

        console.line("Checking for existing asset...");
        if let Some(existing) = release.find_asset(&self.config.target_filename) {
            console.warn(&format!("Found existing asset (ID: {})", existing.id));
            console.line("   Deleting old version...");
        }
        let replaced = self.replace_existing(&release).await;
        match &replaced {
            ReplaceOutcome::Deleted { .. } => console.ok("Old asset deleted"),
            ReplaceOutcome::DeleteFailed { error, .. } => {
                console.warn(&format!("Warning: Could not delete old asset: {error}"))
            }
            ReplaceOutcome::NotPresent => {
                console.info("No existing asset found (this is the first upload)")
            }
        }

        console.blank();
        console.line("Uploading new MSI to GitHub...");
        console.line(&format!("Upload filename: {}", self.config.target_filename));
        console.line("(This may take 30-60 seconds...)");
        console.blank();

        let uploaded = self.upload(release.id, &artifact).await?;
        info!(url = %uploaded.browser_download_url, "asset uploaded");

        Ok(PublishReport {
            artifact,
            sha256,
            release_id: release.id,
            replaced,
            target_filename: self.config.target_filename.clone(),
            download_url: uploaded.browser_download_url,
        })
    }

    /// Runs the pipeline, prints the outcome and returns the exit status.
    pub async fn execute<W: Write>(&self, console: &mut Console<W>) -> u8 {
        match self.run(console).await {
            Ok(report) => {
                console.success(&report);
                0
            }
            Err(e) => {
                console.failure(&e);
                e.exit_code()
            }
        }
    }
}
