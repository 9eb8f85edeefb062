//! Wire types for the release endpoints.

use serde::Deserialize;

/// A release as returned by `GET repos/{repo}/releases/tags/{tag}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    pub id: u64,
    #[serde(default)]
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl Release {
    /// Returns the asset whose name equals `name` exactly.
    pub fn find_asset(&self, name: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.name == name)
    }
}

/// A file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Asset {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub browser_download_url: String,
}

/// Response body of a successful asset upload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadedAsset {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub browser_download_url: String,
}

/// Error body returned by the API on failure.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_ignores_unknown_fields() {
        let json = r#"{
            "id": 123,
            "tag_name": "v2.0.0",
            "name": "Stable",
            "draft": false,
            "assets": [
                {"id": 9, "name": "ActivTrak-Account-680398.msi", "size": 10,
                 "browser_download_url": "https://example.test/a.msi", "state": "uploaded"}
            ]
        }"#;
        let release: Release = serde_json::from_str(json).unwrap();
        assert_eq!(release.id, 123);
        assert_eq!(release.tag_name, "v2.0.0");
        assert_eq!(release.assets.len(), 1);
        assert_eq!(release.assets[0].size, 10);
    }

    #[test]
    fn release_without_assets_field() {
        let release: Release = serde_json::from_str(r#"{"id": 5}"#).unwrap();
        assert!(release.assets.is_empty());
    }

    #[test]
    fn find_asset_is_exact_and_case_sensitive() {
        let release: Release = serde_json::from_str(
            r#"{"id": 1, "assets": [
                {"id": 1, "name": "activtrak-account-680398.msi"},
                {"id": 2, "name": "ActivTrak-Account-680398.msi.bak"},
                {"id": 3, "name": "ActivTrak-Account-680398.msi"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(release.find_asset("ActivTrak-Account-680398.msi").unwrap().id, 3);
        assert!(release.find_asset("ActivTrak-Account").is_none());
    }

    #[test]
    fn uploaded_asset_requires_download_url() {
        assert!(serde_json::from_str::<UploadedAsset>(r#"{"id": 1}"#).is_err());
    }
}
