//! Publish error types.

use std::path::PathBuf;

use msi_relay_artifact::ArtifactError;
use msi_relay_forge::client::ErrorDetail;

/// Errors loading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Fatal errors that stop a publish run.
///
/// The failed stale-asset delete is not here: it is reported as
/// [`ReplaceOutcome::DeleteFailed`](crate::ReplaceOutcome::DeleteFailed)
/// and the run continues.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("{var} environment variable not set")]
    MissingCredential { var: String },

    #[error("no installer matching {pattern} found in {}", dir.display())]
    ArtifactNotFound { dir: PathBuf, pattern: String },

    #[error("cannot read installer: {0}")]
    Artifact(#[from] ArtifactError),

    #[error("could not find release {tag}: authentication failed")]
    Authentication {
        tag: String,
        #[source]
        source: msi_relay_forge::Error,
    },

    #[error("could not find release {tag} in {repo}")]
    ReleaseNotFound {
        repo: String,
        tag: String,
        #[source]
        source: msi_relay_forge::Error,
    },

    #[error("could not find release {tag}: {source}")]
    Lookup {
        tag: String,
        #[source]
        source: msi_relay_forge::Error,
    },

    #[error("upload failed: {0}")]
    Upload(#[source] msi_relay_forge::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PublishError {
    /// Classifies a failed release lookup by HTTP status.
    pub fn from_lookup(repo: &str, tag: &str, source: msi_relay_forge::Error) -> Self {
        match source.status() {
            Some(401) => PublishError::Authentication {
                tag: tag.to_string(),
                source,
            },
            Some(404) => PublishError::ReleaseNotFound {
                repo: repo.to_string(),
                tag: tag.to_string(),
                source,
            },
            _ => PublishError::Lookup {
                tag: tag.to_string(),
                source,
            },
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Operator remediation lines, printed after the error headline.
    ///
    /// An empty string stands for a blank line.
    pub fn guidance(&self) -> Vec<String> {
        match self {
            PublishError::MissingCredential { var } => vec![
                String::new(),
                "Please set your GitHub Personal Access Token:".into(),
                String::new(),
                "Option 1 - Add to shell profile (recommended):".into(),
                format!("  echo 'export {var}=\"ghp_YourTokenHere\"' >> ~/.zshrc"),
                "  source ~/.zshrc".into(),
                String::new(),
                "Option 2 - Set for this session only:".into(),
                format!("  export {var}=\"ghp_YourTokenHere\""),
                String::new(),
                "Option 3 - Pass inline:".into(),
                format!("  {var}=\"ghp_YourTokenHere\" msi-relay"),
                String::new(),
                "Get a token at: https://github.com/settings/tokens".into(),
                "Required permissions: repo (Full control of private repositories)".into(),
            ],
            PublishError::ArtifactNotFound { .. } => vec![
                String::new(),
                "Please download the MSI from ActivTrak portal first:".into(),
                "1. Go to: https://app.activtrak.com".into(),
                "2. Navigate to: Settings > Agents > Download Agent".into(),
                "3. Select: 'MSI for mass deployment'".into(),
                "4. Download the MSI".into(),
                "5. Run this tool again".into(),
            ],
            PublishError::Artifact(e) => vec![format!("Error: {e}")],
            PublishError::Authentication { source, .. } => {
                let mut lines = http_status_lines(source);
                lines.push(String::new());
                lines.push("Authentication failed. Please check your API token.".into());
                lines
            }
            PublishError::ReleaseNotFound { source, .. } => {
                let mut lines = http_status_lines(source);
                lines.push(String::new());
                lines.push("Release not found. Verify the repository and release tag.".into());
                lines
            }
            PublishError::Lookup { source, .. } => match source.status() {
                Some(_) => http_status_lines(source),
                None => vec![format!("Error: {source}")],
            },
            PublishError::Upload(source) => match source.status() {
                Some(status) => {
                    let mut lines = vec![
                        format!("HTTP {status}"),
                        format!("Reason: {}", source.reason().unwrap_or_default()),
                    ];
                    match source.detail() {
                        Some(ErrorDetail::Message(msg)) => lines.push(format!("Message: {msg}")),
                        Some(ErrorDetail::Raw(raw)) => lines.push(format!("Response: {raw}")),
                        None => {}
                    }
                    lines
                }
                None => vec![format!("Error: {source}")],
            },
            PublishError::Config(e) => vec![format!("Error: {e}")],
        }
    }
}

fn http_status_lines(source: &msi_relay_forge::Error) -> Vec<String> {
    match source.status() {
        Some(status) => vec![format!(
            "HTTP Error {status}: {}",
            source.reason().unwrap_or_default()
        )],
        None => vec![format!("Error: {source}")],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16, reason: &str, body: &str) -> msi_relay_forge::Error {
        msi_relay_forge::Error::Api {
            status,
            reason: reason.into(),
            body: body.into(),
        }
    }

    #[test]
    fn lookup_401_is_authentication() {
        let err = PublishError::from_lookup("o/r", "v2.0.0", api_error(401, "Unauthorized", ""));
        assert!(matches!(err, PublishError::Authentication { .. }));
        let guidance = err.guidance().join("\n");
        assert!(guidance.contains("HTTP Error 401: Unauthorized"));
        assert!(guidance.contains("Authentication failed"));
    }

    #[test]
    fn lookup_404_is_not_found() {
        let err = PublishError::from_lookup("o/r", "v9", api_error(404, "Not Found", ""));
        assert!(matches!(err, PublishError::ReleaseNotFound { .. }));
        assert!(err.to_string().contains("v9"));
        assert!(err.guidance().join("\n").contains("Verify the repository and release tag"));
    }

    #[test]
    fn lookup_other_is_generic() {
        let err = PublishError::from_lookup("o/r", "v2.0.0", api_error(500, "Internal Server Error", ""));
        assert!(matches!(err, PublishError::Lookup { .. }));
        let guidance = err.guidance().join("\n");
        assert!(!guidance.contains("Authentication failed"));
        assert!(!guidance.contains("Release not found"));
    }

    #[test]
    fn lookup_parse_error_surfaces_text() {
        let json_err: msi_relay_forge::Error =
            serde_json::from_slice::<msi_relay_forge::Release>(b"{\"id\":")
                .unwrap_err()
                .into();
        let err = PublishError::from_lookup("o/r", "v2.0.0", json_err);
        assert!(matches!(err, PublishError::Lookup { .. }));
        assert!(err.guidance()[0].starts_with("Error: JSON error"));
    }

    #[test]
    fn upload_guidance_prefers_json_message() {
        let err = PublishError::Upload(api_error(
            422,
            "Unprocessable Entity",
            r#"{"message":"Validation Failed"}"#,
        ));
        let guidance = err.guidance();
        assert_eq!(guidance[0], "HTTP 422");
        assert_eq!(guidance[1], "Reason: Unprocessable Entity");
        assert_eq!(guidance[2], "Message: Validation Failed");
    }

    #[test]
    fn upload_guidance_falls_back_to_raw_body() {
        let err = PublishError::Upload(api_error(502, "Bad Gateway", "<html>oops</html>"));
        assert_eq!(err.guidance()[2], "Response: <html>oops</html>");
    }

    #[test]
    fn every_error_exits_nonzero() {
        let errors = [
            PublishError::MissingCredential { var: "T".into() },
            PublishError::ArtifactNotFound {
                dir: PathBuf::from("/tmp"),
                pattern: "*.msi".into(),
            },
            PublishError::Upload(api_error(500, "", "")),
        ];
        for err in errors {
            assert_ne!(err.exit_code(), 0, "{err}");
        }
    }

    #[test]
    fn credential_guidance_names_variable() {
        let err = PublishError::MissingCredential {
            var: "GITHUB_TOKEN".into(),
        };
        let guidance = err.guidance().join("\n");
        assert!(guidance.contains("export GITHUB_TOKEN="));
        assert!(guidance.contains("https://github.com/settings/tokens"));
    }
}
