//! Installer republish flow.
//!
//! This crate implements the **business logic** for swapping the asset
//! behind a stable release download URL. It has no knowledge of process
//! exit or of how the HTTP client is built; the binary supplies a
//! `ReleaseApi` implementation and an output sink.
//!
//! # Pipeline
//!
//! 1. **Credential** - read the API token from the environment
//! 2. **Locate** - pick the newest matching installer in the download folder
//! 3. **Digest** - SHA-256 of the installer, for the operator
//! 4. **Lookup** - resolve the release tag to a release ID and asset list
//! 5. **Replace** - delete any asset already using the target name
//! 6. **Upload** - upload the installer under the target name

pub mod config;
pub mod credential;
pub mod error;
pub mod pipeline;
pub mod report;

pub use config::PublishConfig;
pub use credential::Credential;
pub use error::{ConfigError, PublishError};
pub use pipeline::{PublishReport, Publisher, ReplaceOutcome};
pub use report::Console;
