//! Application configuration.

use crate::backend::auth::SignInProvider;
use crate::backend::utils::paths::{get_config_path, get_session_path};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Connection settings of the hosted authentication and database project,
/// in the camelCase shape the provider console issues them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement_id: Option<String>,
}

impl BackendConfig {
    /// Settings for a project using the provider's default domains.
    pub fn for_project(
        project_id: impl Into<String>,
        api_key: impl Into<String>,
        app_id: impl Into<String>,
    ) -> Self {
        let project_id = project_id.into();
        Self {
            api_key: api_key.into(),
            auth_domain: format!("{project_id}.firebaseapp.com"),
            storage_bucket: format!("{project_id}.firebasestorage.app"),
            messaging_sender_id: String::new(),
            app_id: app_id.into(),
            measurement_id: None,
            project_id,
        }
    }

    /// Checks the fields the backend SDK refuses to start without.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("apiKey", &self.api_key),
            ("projectId", &self.project_id),
            ("appId", &self.app_id),
        ] {
            if value.trim().is_empty() {
                bail!("backend config is missing {field}");
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub auth_providers: Vec<SignInProvider>,
    /// Where the signed-in session is kept. Defaults to the app directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            auth_providers: SignInProvider::ALL.to_vec(),
            session_file: None,
        }
    }
}

impl AppConfig {
    /// Loads the configuration from the app directory.
    pub async fn load() -> Result<Self> {
        Self::load_from(&get_config_path()?).await
    }

    /// Loads the configuration from `path`, falling back to defaults when the
    /// file does not exist. The file must hold a JSON object.
    pub async fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let json = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let value: serde_json::Value = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        if !value.is_object() {
            bail!("Failed to parse {}: expected a JSON object", path.display());
        }
        serde_json::from_value(value).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Saves the configuration to `path`.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).await?;
        Ok(())
    }

    /// Resolves the session file location.
    pub fn session_path(&self) -> Result<PathBuf> {
        match &self.session_file {
            Some(path) => Ok(path.clone()),
            None => get_session_path(),
        }
    }
}
