//! Best-effort marker icon compatibility patch.
//!
//! Map pages ship Leaflet's stock marker icons. Deployments can point
//! `PROPMAP_ICON_OVERRIDES_PATH` at a YAML file with replacement icon URLs;
//! it is loaded once in the background after start-up. Nothing waits on the
//! load and a missing or broken file leaves the stock icons in place.

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerIconDefaults {
    pub icon_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_retina_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_url: Option<String>,
}

/// Shared slot that the patch task fills at most once.
#[derive(Debug, Clone, Default)]
pub struct IconDefaults(Arc<OnceLock<MarkerIconDefaults>>);

impl IconDefaults {
    pub fn get(&self) -> Option<&MarkerIconDefaults> {
        self.0.get()
    }

    /// JSON for `L.Icon.Default.mergeOptions`, or `null` while unpatched.
    pub fn to_json(&self) -> String {
        self.get()
            .and_then(|d| serde_json::to_string(d).ok())
            .unwrap_or_else(|| "null".to_string())
    }

    /// Starts the background load. Returns `None` when no path is configured.
    pub fn spawn_patch(&self, path: Option<PathBuf>) -> Option<JoinHandle<()>> {
        let path = path?;
        let slot = Arc::clone(&self.0);
        Some(tokio::spawn(async move {
            let content = match tokio::fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "icon overrides unavailable");
                    return;
                }
            };
            match serde_yaml::from_str::<MarkerIconDefaults>(&content) {
                Ok(defaults) => {
                    if slot.set(defaults).is_ok() {
                        tracing::info!(path = %path.display(), "marker icon overrides applied");
                    }
                }
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "icon overrides ignored");
                }
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("propmap-{}-{name}", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn loads_overrides_from_yaml() {
        let path = temp_path("icons.yaml");
        tokio::fs::write(
            &path,
            "iconUrl: /static/marker.png\nshadowUrl: /static/shadow.png\n",
        )
        .await
        .expect("write fixture");

        let icons = IconDefaults::default();
        icons
            .spawn_patch(Some(path.clone()))
            .expect("task spawned")
            .await
            .expect("task completes");

        let loaded = icons.get().expect("overrides loaded");
        assert_eq!(loaded.icon_url, "/static/marker.png");
        assert_eq!(loaded.shadow_url.as_deref(), Some("/static/shadow.png"));
        assert!(icons.to_json().contains("\"iconUrl\":\"/static/marker.png\""));

        let _ = tokio::fs::remove_file(path).await;
    }

    #[tokio::test]
    async fn missing_file_is_silently_ignored() {
        let icons = IconDefaults::default();
        icons
            .spawn_patch(Some(temp_path("absent.yaml")))
            .expect("task spawned")
            .await
            .expect("task completes without panicking");
        assert!(icons.get().is_none());
        assert_eq!(icons.to_json(), "null");
    }

    #[tokio::test]
    async fn malformed_file_is_silently_ignored() {
        let path = temp_path("broken.yaml");
        tokio::fs::write(&path, "- not: [a mapping")
            .await
            .expect("write fixture");

        let icons = IconDefaults::default();
        icons
            .spawn_patch(Some(path.clone()))
            .expect("task spawned")
            .await
            .expect("task completes");
        assert!(icons.get().is_none());

        let _ = tokio::fs::remove_file(path).await;
    }

    #[test]
    fn no_path_spawns_nothing() {
        assert!(IconDefaults::default().spawn_patch(None).is_none());
    }
}
